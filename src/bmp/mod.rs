//! Uncompressed 24/32-bit BMP decoder and encoder.
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], or
//! [`crate::DecodeRequest`] for configurable decoding.

mod decode;
mod encode;
mod header;

pub use decode::BmpPermissiveness;
pub use header::{BmpFileHeader, BmpInfoHeader, FILE_HEADER_LEN, INFO_HEADER_LEN};

use crate::error::BitmapError;
use crate::image::DecodedImage;
use crate::limits::Limits;
use alloc::vec::Vec;
use enough::Stop;

/// Decode BMP data (stored row order, native BGR/BGRA bytes).
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: BmpPermissiveness,
    stop: &dyn Stop,
) -> Result<DecodedImage, BitmapError> {
    decode::decode_bmp_image(data, limits, permissiveness, stop)
}

/// Read just the dimensions and layout, without allocating a pixel buffer.
pub(crate) fn probe(data: &[u8]) -> Result<crate::ImageInfo, BitmapError> {
    let headers = decode::parse_bmp_headers(data)?;
    Ok(crate::ImageInfo {
        width: headers.width,
        height: headers.height,
        layout: headers.layout,
        row_order: headers.row_order,
    })
}

/// Encode to BMP.
pub(crate) fn encode(image: &DecodedImage, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(image, stop)
}
