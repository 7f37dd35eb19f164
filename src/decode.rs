use enough::Stop;

use crate::bmp::BmpPermissiveness;
use crate::error::BitmapError;
use crate::image::DecodedImage;
use crate::limits::Limits;

/// Builder for BMP decoding.
///
/// ```no_run
/// use bmpsketch::{BmpPermissiveness, DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits { max_pixels: Some(16_000_000), ..Default::default() };
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_permissiveness(BmpPermissiveness::Strict)
///     .decode(Unstoppable)?;
/// # Ok::<(), bmpsketch::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: BmpPermissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: BmpPermissiveness::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// How to treat pixel data that ends before the header says it should.
    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodedImage, BitmapError> {
        crate::bmp::decode(self.data, self.limits, self.permissiveness, &stop)
    }
}
