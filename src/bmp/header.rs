//! BMP file and info headers, serialised field by field in little-endian.

use alloc::vec::Vec;

use crate::pixel::PixelLayout;

/// Size of `BITMAPFILEHEADER` on disk.
pub const FILE_HEADER_LEN: usize = 14;
/// Size of `BITMAPINFOHEADER` on disk.
pub const INFO_HEADER_LEN: usize = 40;

pub(crate) const SIGNATURE: [u8; 2] = *b"BM";

/// The 14-byte BMP file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpFileHeader {
    pub signature: [u8; 2],
    /// Total file size in bytes, as declared.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset of the pixel data from the start of the file (`bfOffBits`).
    pub pixel_offset: u32,
}

impl BmpFileHeader {
    /// Build a fresh header for `info_size` bytes of info header followed by
    /// `pixel_data_size` bytes of pixels. `None` if the file would not fit the
    /// 32-bit size field.
    pub(crate) fn for_layout(info_size: u32, pixel_data_size: usize) -> Option<Self> {
        let pixel_offset = (FILE_HEADER_LEN as u32).checked_add(info_size)?;
        let file_size = (pixel_offset as usize).checked_add(pixel_data_size)?;
        Some(Self {
            signature: SIGNATURE,
            file_size: u32::try_from(file_size).ok()?,
            reserved1: 0,
            reserved2: 0,
            pixel_offset,
        })
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.pixel_offset.to_le_bytes());
    }
}

/// The 40-byte `BITMAPINFOHEADER`.
///
/// Only `width`, `height`, `bit_count` and `compression` are interpreted;
/// the remaining fields round-trip unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfoHeader {
    /// Declared header size; 40, or larger for V4/V5 headers.
    pub size: u32,
    pub width: i32,
    /// Positive for bottom-up row order, negative for top-down.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BmpInfoHeader {
    /// A plain `BITMAPINFOHEADER` for a freshly created image.
    pub(crate) fn standard(
        width: i32,
        height: i32,
        layout: PixelLayout,
        image_size: u32,
    ) -> Self {
        Self {
            size: INFO_HEADER_LEN as u32,
            width,
            height,
            planes: 1,
            bit_count: layout.bits_per_pixel(),
            compression: 0,
            image_size,
            x_pels_per_meter: 2835, // 72 DPI
            y_pels_per_meter: 2835,
            colors_used: 0,
            colors_important: 0,
        }
    }

    /// Parse the fixed 40-byte layout.
    pub(crate) fn from_le_bytes(b: &[u8; INFO_HEADER_LEN]) -> Self {
        let u16_at = |i: usize| u16::from_le_bytes([b[i], b[i + 1]]);
        let u32_at = |i: usize| u32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        let i32_at = |i: usize| i32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        Self {
            size: u32_at(0),
            width: i32_at(4),
            height: i32_at(8),
            planes: u16_at(12),
            bit_count: u16_at(14),
            compression: u32_at(16),
            image_size: u32_at(20),
            x_pels_per_meter: i32_at(24),
            y_pels_per_meter: i32_at(28),
            colors_used: u32_at(32),
            colors_important: u32_at(36),
        }
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bit_count.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_pels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_important.to_le_bytes());
    }
}
