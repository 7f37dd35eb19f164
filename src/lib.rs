//! # bmpsketch
//!
//! Uncompressed 24/32-bit BMP decoder and encoder, a crude ASCII console
//! preview, and integer line drawing.
//!
//! ## Decoding keeps the file's layout
//!
//! The pixel buffer is the file's pixel area copied verbatim: BGR/BGRA bytes,
//! rows padded to 4 bytes, rows in stored order. The row order
//! ([`RowOrder`]) is fixed once from the sign of the header height and every
//! read, write and the encoder go through the same visual-row translation,
//! so decode → encode reproduces the pixel data unchanged.
//!
//! ## Supported Formats
//!
//! - 24-bit BGR and 32-bit BGRA, `BI_RGB` (no compression)
//! - Bottom-up (positive height) and top-down (negative height) rows
//! - `BITMAPINFOHEADER` and larger (V4/V5) info headers, extension bytes
//!   preserved verbatim
//!
//! ## Non-Goals
//!
//! - RLE, bitfields, palettes and other bit depths
//! - Any format other than BMP
//! - Anti-aliasing or shapes beyond line segments
//!
//! ## Usage
//!
//! ```no_run
//! use bmpsketch::{AsciiPreview, RasterSurface, Unstoppable, decode_bmp, encode_bmp};
//! use bmpsketch::rgb::RGB8;
//!
//! let data: &[u8] = &[]; // your BMP bytes
//! let mut surface = RasterSurface::new(decode_bmp(data, Unstoppable)?);
//! print!("{}", AsciiPreview::default().render(surface.image()));
//!
//! surface.draw_line(0, 0, 10, 5, RGB8::new(255, 0, 0));
//! let bytes = encode_bmp(surface.image(), Unstoppable)?;
//! # Ok::<(), bmpsketch::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod image;
mod info;
mod limits;
mod pixel;
mod preview;
mod raster;

pub mod bmp;

mod decode;
#[cfg(feature = "std")]
mod fs;

use alloc::vec::Vec;

// Re-exports
pub use bmp::{BmpFileHeader, BmpInfoHeader, BmpPermissiveness};
pub use decode::DecodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::{BitmapError, ErrorKind};
#[cfg(feature = "std")]
pub use fs::{load_bmp, save_bmp};
pub use image::DecodedImage;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{PixelLayout, RowOrder, row_stride};
pub use preview::AsciiPreview;
pub use raster::RasterSurface;
pub use rgb;

/// Decode a BMP with default settings (lenient about truncated pixel data).
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<DecodedImage, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode a BMP, rejecting images that exceed `limits`.
pub fn decode_bmp_with_limits(
    data: &[u8],
    limits: &Limits,
    stop: impl Stop,
) -> Result<DecodedImage, BitmapError> {
    DecodeRequest::new(data).with_limits(limits).decode(stop)
}

/// Encode an image back to BMP bytes in its own bit depth and row order.
pub fn encode_bmp(image: &DecodedImage, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(image, &stop)
}
