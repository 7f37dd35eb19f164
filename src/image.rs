use alloc::vec::Vec;

use crate::bmp::{BmpFileHeader, BmpInfoHeader};
use crate::error::BitmapError;
use crate::pixel::{PixelLayout, RowOrder, row_stride};

/// A decoded BMP: both headers plus the pixel buffer in stored row order.
///
/// The buffer is `row_stride() * height()` bytes, rows padded to 4 bytes.
/// Row `0` of the buffer is the bottom of the picture for
/// [`RowOrder::BottomUp`] images and the top for [`RowOrder::TopDown`].
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub(crate) file_header: BmpFileHeader,
    pub(crate) info_header: BmpInfoHeader,
    /// Info header bytes past the first 40 (V4/V5), kept verbatim.
    pub(crate) info_extension: Vec<u8>,
    pub(crate) layout: PixelLayout,
    pub(crate) row_order: RowOrder,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) stride: usize,
    pub(crate) pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a zero-filled (black, transparent) image with a plain
    /// 40-byte info header.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        row_order: RowOrder,
    ) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge {
            width: i64::from(width),
            height: i64::from(height),
        };
        if width == 0 || height == 0 {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "cannot create a {width}x{height} image"
            )));
        }
        let signed_width = i32::try_from(width).map_err(|_| too_large())?;
        if i32::try_from(height).is_err() {
            return Err(too_large());
        }
        let stride = row_stride(width, layout).ok_or_else(too_large)?;
        let data_len = stride.checked_mul(height as usize).ok_or_else(too_large)?;
        let image_size = u32::try_from(data_len).map_err(|_| too_large())?;

        let info_header = BmpInfoHeader::standard(
            signed_width,
            row_order.signed_height(height),
            layout,
            image_size,
        );
        let file_header =
            BmpFileHeader::for_layout(info_header.size, data_len).ok_or_else(too_large)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(data_len).map_err(|_| too_large())?;
        pixels.resize(data_len, 0);

        Ok(Self {
            file_header,
            info_header,
            info_extension: Vec::new(),
            layout,
            row_order,
            width,
            height,
            stride,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in rows, regardless of row order.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    /// Bytes per stored row, including padding.
    pub fn row_stride(&self) -> usize {
        self.stride
    }

    /// The file header as read from disk (or built by [`DecodedImage::new`]).
    ///
    /// The encoder rebuilds this header from scratch; it is kept for
    /// inspection only.
    pub fn file_header(&self) -> &BmpFileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &BmpInfoHeader {
        &self.info_header
    }

    /// Opaque V4/V5 info header bytes following the 40-byte core.
    pub fn info_extension(&self) -> &[u8] {
        &self.info_extension
    }

    /// Raw pixel buffer in stored row order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Byte offset of visual pixel `(x, y)`, `y = 0` being the top row.
    /// `None` when out of bounds.
    pub fn pixel_offset(&self, x: usize, y: usize) -> Option<usize> {
        let (w, h) = (self.width as usize, self.height as usize);
        if x >= w || y >= h {
            return None;
        }
        let row = self.row_order.physical_row(y, h);
        Some(row * self.stride + x * self.layout.bytes_per_pixel())
    }

    /// Stored bytes of one visual row, padding included.
    pub(crate) fn visual_row(&self, y: usize) -> &[u8] {
        let row = self.row_order.physical_row(y, self.height as usize);
        &self.pixels[row * self.stride..(row + 1) * self.stride]
    }
}
