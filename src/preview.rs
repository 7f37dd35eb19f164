//! Crude text preview of a decoded image.

use alloc::string::String;
use core::fmt;

use crate::image::DecodedImage;

/// Glyph mapping for the console preview.
///
/// Pure black and pure white map to their own glyphs; every other colour
/// becomes `other`. Each pixel is printed twice to make up for console cells
/// being taller than they are wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AsciiPreview {
    pub black: char,
    pub white: char,
    pub other: char,
}

impl Default for AsciiPreview {
    fn default() -> Self {
        Self {
            black: '.',
            white: '#',
            other: '?',
        }
    }
}

impl AsciiPreview {
    pub fn new(black: char, white: char) -> Self {
        Self {
            black,
            white,
            ..Self::default()
        }
    }

    /// Glyph for one pixel given in stored B,G,R order.
    pub fn glyph(&self, bgr: [u8; 3]) -> char {
        match bgr {
            [0, 0, 0] => self.black,
            [255, 255, 255] => self.white,
            _ => self.other,
        }
    }

    /// Write one line per image row, top row first.
    pub fn render_to<W: fmt::Write>(&self, image: &DecodedImage, out: &mut W) -> fmt::Result {
        let bpp = image.layout().bytes_per_pixel();
        let width = image.width() as usize;
        for y in 0..image.height() as usize {
            let row = image.visual_row(y);
            for px in row[..width * bpp].chunks_exact(bpp) {
                let c = self.glyph([px[0], px[1], px[2]]);
                out.write_char(c)?;
                out.write_char(c)?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }

    pub fn render(&self, image: &DecodedImage) -> String {
        let line_len = image.width() as usize * 2 + 1;
        let mut s = String::with_capacity(line_len * image.height() as usize);
        // Writing into a String cannot fail.
        let _ = self.render_to(image, &mut s);
        s
    }

    /// Print to a byte stream such as stdout.
    #[cfg(feature = "std")]
    pub fn print_to<W: std::io::Write>(
        &self,
        image: &DecodedImage,
        out: &mut W,
    ) -> std::io::Result<()> {
        out.write_all(self.render(image).as_bytes())
    }
}
