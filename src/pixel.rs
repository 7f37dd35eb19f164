/// Pixel memory layout of a BMP buffer.
///
/// BMP stores channels in blue-green-red(-alpha) order; only the two
/// uncompressed true-colour depths are supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 24 bits per pixel, 3 bytes B,G,R.
    Bgr8,
    /// 32 bits per pixel, 4 bytes B,G,R,A.
    Bgra8,
}

impl PixelLayout {
    /// Layout for a `biBitCount` header value, if supported.
    pub fn from_bit_count(bpp: u16) -> Option<Self> {
        match bpp {
            24 => Some(Self::Bgr8),
            32 => Some(Self::Bgra8),
            _ => None,
        }
    }

    pub fn bits_per_pixel(&self) -> u16 {
        match self {
            Self::Bgr8 => 24,
            Self::Bgra8 => 32,
        }
    }

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bgr8 => 3,
            Self::Bgra8 => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Bgra8)
    }
}

/// Physical row order of a BMP pixel buffer, fixed by the sign of the
/// header height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum RowOrder {
    /// Positive height: first stored row is the bottom of the image.
    #[default]
    BottomUp,
    /// Negative height: first stored row is the top of the image.
    TopDown,
}

impl RowOrder {
    pub fn from_height(height: i32) -> Self {
        if height < 0 {
            Self::TopDown
        } else {
            Self::BottomUp
        }
    }

    /// Physical buffer row holding visual row `y` (0 = top) of an image
    /// `height` rows tall. `y` must be below `height`.
    #[inline]
    pub fn physical_row(self, y: usize, height: usize) -> usize {
        match self {
            Self::BottomUp => height - 1 - y,
            Self::TopDown => y,
        }
    }

    /// Sign applied to the absolute height when writing `biHeight`.
    pub(crate) fn signed_height(self, height: u32) -> i32 {
        match self {
            Self::BottomUp => height as i32,
            Self::TopDown => -(height as i32),
        }
    }
}

/// Bytes per stored row: `ceil(bpp * width / 32) * 4`.
///
/// Returns `None` on overflow.
pub fn row_stride(width: u32, layout: PixelLayout) -> Option<usize> {
    (width as usize)
        .checked_mul(usize::from(layout.bits_per_pixel()))
        .map(|bits| bits.div_ceil(32))
        .and_then(|words| words.checked_mul(4))
}
