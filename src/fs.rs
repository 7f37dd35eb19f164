//! Reading and writing BMP files by path.

use std::path::Path;

use enough::Stop;

use crate::bmp::BmpPermissiveness;
use crate::decode::DecodeRequest;
use crate::error::BitmapError;
use crate::image::DecodedImage;

fn open_error(path: &Path, source: std::io::Error) -> BitmapError {
    BitmapError::Open {
        path: path.to_path_buf(),
        source,
    }
}

/// Read and decode the BMP file at `path`.
///
/// Any failure to read the file is reported as [`BitmapError::Open`].
pub fn load_bmp(
    path: impl AsRef<Path>,
    permissiveness: BmpPermissiveness,
    stop: impl Stop,
) -> Result<DecodedImage, BitmapError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| open_error(path, e))?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read BMP file");
    DecodeRequest::new(&data)
        .with_permissiveness(permissiveness)
        .decode(stop)
}

/// Encode `image` and write it to `path`, replacing any existing file.
pub fn save_bmp(
    path: impl AsRef<Path>,
    image: &DecodedImage,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    let path = path.as_ref();
    let bytes = crate::bmp::encode(image, &stop)?;
    std::fs::write(path, &bytes).map_err(|e| open_error(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote BMP file");
    Ok(())
}
