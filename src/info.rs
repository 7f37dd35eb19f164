use crate::error::BitmapError;
use crate::pixel::{PixelLayout, RowOrder};

/// Image metadata read from the headers alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    /// Absolute height in rows.
    pub height: u32,
    pub layout: PixelLayout,
    pub row_order: RowOrder,
}

impl ImageInfo {
    /// Probe BMP headers without decoding pixels.
    ///
    /// Applies the same validation as a full decode, so an `Ok` here means
    /// the format is supported.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        crate::bmp::probe(data)
    }
}
