//! Pixel-level drawing on a decoded BMP.
//!
//! Coordinates are visual: `(0, 0)` is the top-left corner no matter how the
//! rows are stored.

use rgb::{RGB8, RGBA8};

use crate::image::DecodedImage;

/// Drawing surface over an owned [`DecodedImage`].
#[derive(Clone, Debug)]
pub struct RasterSurface {
    image: DecodedImage,
}

impl RasterSurface {
    pub fn new(image: DecodedImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn into_image(self) -> DecodedImage {
        self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.image.pixel_offset(x, y)
    }

    /// Read the pixel at `(x, y)`. 24-bit images report alpha 255.
    pub fn pixel(&self, x: i32, y: i32) -> Option<RGBA8> {
        let off = self.offset(x.into(), y.into())?;
        let px = &self.image.pixels()[off..off + self.image.layout().bytes_per_pixel()];
        let a = if self.image.layout().has_alpha() {
            px[3]
        } else {
            255
        };
        Some(RGBA8::new(px[2], px[1], px[0], a))
    }

    /// Write one pixel. Coordinates outside the image are ignored.
    ///
    /// On 32-bit images the alpha byte is set to 255.
    pub fn plot_pixel(&mut self, x: i32, y: i32, color: RGB8) {
        self.plot(x.into(), y.into(), color);
    }

    fn plot(&mut self, x: i64, y: i64, color: RGB8) {
        let Some(off) = self.offset(x, y) else {
            return;
        };
        let has_alpha = self.image.layout().has_alpha();
        let px = &mut self.image.pixels_mut()[off..];
        px[0] = color.b;
        px[1] = color.g;
        px[2] = color.r;
        if has_alpha {
            px[3] = 255;
        }
    }

    /// Draw a line from `(x1, y1)` to `(x2, y2)`, both endpoints included,
    /// with Bresenham's integer algorithm. Points off the image are skipped.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: RGB8) {
        // i64 keeps `2 * err` and the deltas exact for any pair of i32 points.
        let (mut x, mut y) = (i64::from(x1), i64::from(y1));
        let (x2, y2) = (i64::from(x2), i64::from(y2));
        let dx = (x2 - x).abs();
        let dy = (y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.plot(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw both corner-to-corner diagonals.
    pub fn draw_cross(&mut self, color: RGB8) {
        let w = i32::try_from(self.width()).unwrap_or(i32::MAX);
        let h = i32::try_from(self.height()).unwrap_or(i32::MAX);
        self.draw_line(0, 0, w - 1, h - 1, color);
        self.draw_line(0, h - 1, w - 1, 0, color);
    }
}

impl From<DecodedImage> for RasterSurface {
    fn from(image: DecodedImage) -> Self {
        Self::new(image)
    }
}
