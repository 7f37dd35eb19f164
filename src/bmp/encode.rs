//! BMP encoder: writes a [`DecodedImage`] back out in its own format.

use alloc::vec::Vec;

use enough::Stop;

use super::header::BmpFileHeader;
use crate::error::BitmapError;
use crate::image::DecodedImage;
use crate::pixel::{RowOrder, row_stride};

/// Serialise headers and pixel rows.
///
/// The file header is rebuilt from scratch; the info header (and any V4/V5
/// extension) is written verbatim.
pub(crate) fn encode_bmp(image: &DecodedImage, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: i64::from(image.width),
        height: i64::from(image.height),
    };
    let h = image.height as usize;
    let stride = row_stride(image.width, image.layout).ok_or_else(too_large)?;
    let pixel_data_size = stride.checked_mul(h).ok_or_else(too_large)?;
    if image.pixels.len() < pixel_data_size {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "pixel buffer holds {} bytes, {pixel_data_size} required",
            image.pixels.len()
        )));
    }

    let file_header =
        BmpFileHeader::for_layout(image.info_header.size, pixel_data_size).ok_or_else(too_large)?;

    let mut out = Vec::with_capacity(file_header.file_size as usize);
    file_header.write_to(&mut out);
    image.info_header.write_to(&mut out);
    out.extend_from_slice(&image.info_extension);

    stop.check()?;

    // Walk visual rows in the order the file stores them: bottom row first
    // for bottom-up images, top row first for top-down ones.
    for i in 0..h {
        if i % 16 == 0 {
            stop.check()?;
        }
        let y = match image.row_order {
            RowOrder::BottomUp => h - 1 - i,
            RowOrder::TopDown => i,
        };
        out.extend_from_slice(image.visual_row(y));
    }

    tracing::debug!(
        width = image.width,
        height = image.height,
        bytes = out.len(),
        "encoded BMP"
    );

    Ok(out)
}
