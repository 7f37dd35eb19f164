//! BMP decoder for uncompressed 24-bit and 32-bit images.
//!
//! Pixel rows are copied verbatim (BGR/BGRA, stored row order). Headers are
//! parsed field by field in little-endian regardless of host byte order.

use alloc::vec::Vec;

use enough::Stop;

use super::header::{BmpFileHeader, BmpInfoHeader, FILE_HEADER_LEN, INFO_HEADER_LEN, SIGNATURE};
use crate::error::BitmapError;
use crate::image::DecodedImage;
use crate::limits::Limits;
use crate::pixel::{PixelLayout, RowOrder, row_stride};

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how the decoder treats pixel data that ends early.
///
/// Headers must always be complete; this only governs the pixel area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Fail with [`BitmapError::UnexpectedEof`] when the file holds fewer
    /// pixel bytes than the header implies.
    Strict,

    /// Default behavior. Zero-fill whatever the file is missing, including
    /// a pixel offset that points past the end of the data.
    #[default]
    Lenient,
}

/// Most zero-fill [`BmpPermissiveness::Lenient`] invents beyond the bytes the
/// file actually holds. Headers claiming more than this are treated as
/// corrupt rather than allocated.
const MAX_LENIENT_FILL: usize = 64 << 20;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    /// When true, pixel reads beyond EOF return zeros instead of errors.
    permissive: bool,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], permissiveness: BmpPermissiveness) -> Self {
        Self {
            data,
            pos: 0,
            permissive: permissiveness == BmpPermissiveness::Lenient,
        }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn set_position(&mut self, pos: usize) -> Result<(), BitmapError> {
        if pos > self.data.len() {
            if self.permissive {
                self.pos = self.data.len();
                return Ok(());
            }
            return Err(BitmapError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    fn read_slice(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        if n > self.remaining() {
            return Err(BitmapError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.read_slice(N)?);
        Ok(buf)
    }

    fn get_u16_le_err(&mut self) -> Result<u16, BitmapError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    fn get_u32_le_err(&mut self) -> Result<u32, BitmapError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    fn read_exact_bytes(&mut self, buf: &mut [u8]) -> Result<(), BitmapError> {
        let n = buf.len();
        if n > self.remaining() {
            if self.permissive {
                let available = self.remaining();
                buf[..available].copy_from_slice(&self.data[self.pos..self.pos + available]);
                buf[available..].fill(0);
                self.pos = self.data.len();
                return Ok(());
            }
            return Err(BitmapError::UnexpectedEof);
        }
        buf.copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(())
    }
}

// ── Parsed headers ──────────────────────────────────────────────────

pub(crate) struct BmpHeaders {
    pub file: BmpFileHeader,
    pub info: BmpInfoHeader,
    pub info_extension: Vec<u8>,
    pub layout: PixelLayout,
    pub row_order: RowOrder,
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub data_len: usize,
}

/// Parse and validate both headers without touching pixel data.
pub(crate) fn parse_bmp_headers(data: &[u8]) -> Result<BmpHeaders, BitmapError> {
    // Header fields are never zero-filled, so permissiveness is irrelevant here.
    let mut cursor = Cursor::new(data, BmpPermissiveness::Strict);
    let (file, info, info_extension) = read_headers(&mut cursor)?;

    let layout = PixelLayout::from_bit_count(info.bit_count).ok_or_else(|| {
        BitmapError::UnsupportedVariant(alloc::format!(
            "{}-bit BMP; only 24 and 32 bits per pixel are supported",
            info.bit_count
        ))
    })?;
    if info.compression != 0 {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "BMP compression method {}; only uncompressed images are supported",
            info.compression
        )));
    }

    if info.width <= 0 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "BMP width is {}",
            info.width
        )));
    }
    if info.height == 0 {
        return Err(BitmapError::InvalidHeader("BMP height is zero".into()));
    }
    let too_large = || BitmapError::DimensionsTooLarge {
        width: i64::from(info.width),
        height: i64::from(info.height),
    };
    // i32::MIN has no positive counterpart to write back.
    if info.height == i32::MIN {
        return Err(too_large());
    }

    let width = info.width as u32;
    let height = info.height.unsigned_abs();
    let stride = row_stride(width, layout).ok_or_else(too_large)?;
    let data_len = stride.checked_mul(height as usize).ok_or_else(too_large)?;

    Ok(BmpHeaders {
        file,
        info,
        info_extension,
        layout,
        row_order: RowOrder::from_height(info.height),
        width,
        height,
        stride,
        data_len,
    })
}

fn read_headers(
    cursor: &mut Cursor<'_>,
) -> Result<(BmpFileHeader, BmpInfoHeader, Vec<u8>), BitmapError> {
    let signature: [u8; 2] = cursor.read_fixed_bytes()?;
    if signature != SIGNATURE {
        return Err(BitmapError::UnrecognizedFormat);
    }
    let file = BmpFileHeader {
        signature,
        file_size: cursor.get_u32_le_err()?,
        reserved1: cursor.get_u16_le_err()?,
        reserved2: cursor.get_u16_le_err()?,
        pixel_offset: cursor.get_u32_le_err()?,
    };
    debug_assert_eq!(cursor.pos, FILE_HEADER_LEN);

    let info = BmpInfoHeader::from_le_bytes(&cursor.read_fixed_bytes::<INFO_HEADER_LEN>()?);
    let ihsize = info.size as usize;
    if ihsize < INFO_HEADER_LEN {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "BMP info header size {ihsize}; at least {INFO_HEADER_LEN} required"
        )));
    }
    let info_extension = cursor.read_slice(ihsize - INFO_HEADER_LEN)?.to_vec();

    Ok((file, info, info_extension))
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode a BMP byte stream into headers plus stored-order pixel buffer.
pub(crate) fn decode_bmp_image(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: BmpPermissiveness,
    stop: &dyn Stop,
) -> Result<DecodedImage, BitmapError> {
    let headers = parse_bmp_headers(data)?;
    if let Some(limits) = limits {
        limits.check(headers.width, headers.height, headers.data_len)?;
    }
    stop.check()?;

    let mut cursor = Cursor::new(data, permissiveness);
    cursor.set_position(headers.file.pixel_offset as usize)?;
    let available = cursor.remaining();
    if available < headers.data_len {
        let missing = headers.data_len - available;
        if !cursor.permissive || missing > available.max(MAX_LENIENT_FILL) {
            return Err(BitmapError::UnexpectedEof);
        }
        tracing::warn!(
            expected = headers.data_len,
            available,
            "BMP pixel data truncated; zero-filling the rest"
        );
    }

    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(headers.data_len)
        .map_err(|_| BitmapError::DimensionsTooLarge {
            width: i64::from(headers.info.width),
            height: i64::from(headers.info.height),
        })?;
    pixels.resize(headers.data_len, 0);
    for (row, chunk) in pixels.chunks_exact_mut(headers.stride).enumerate() {
        if row % 16 == 0 {
            stop.check()?;
        }
        cursor.read_exact_bytes(chunk)?;
    }

    tracing::debug!(
        width = headers.width,
        height = headers.height,
        bpp = headers.info.bit_count,
        row_order = ?headers.row_order,
        "decoded BMP"
    );

    Ok(DecodedImage {
        file_header: headers.file,
        info_header: headers.info,
        info_extension: headers.info_extension,
        layout: headers.layout,
        row_order: headers.row_order,
        width: headers.width,
        height: headers.height,
        stride: headers.stride,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::ErrorKind;
    use enough::Unstoppable;

    /// Hand-built 24-bit BMP: `rows` are in stored order, each already padded.
    fn raw_bmp(width: i32, height: i32, bpp: u16, compression: u32, rows: &[u8]) -> Vec<u8> {
        let mut bmp = vec![0u8; 54];
        bmp[0] = b'B';
        bmp[1] = b'M';
        bmp[2..6].copy_from_slice(&(54 + rows.len() as u32).to_le_bytes());
        bmp[10..14].copy_from_slice(&54u32.to_le_bytes());
        bmp[14..18].copy_from_slice(&40u32.to_le_bytes());
        bmp[18..22].copy_from_slice(&width.to_le_bytes());
        bmp[22..26].copy_from_slice(&height.to_le_bytes());
        bmp[26..28].copy_from_slice(&1u16.to_le_bytes());
        bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
        bmp[30..34].copy_from_slice(&compression.to_le_bytes());
        bmp.extend_from_slice(rows);
        bmp
    }

    fn decode(data: &[u8], permissiveness: BmpPermissiveness) -> Result<DecodedImage, BitmapError> {
        decode_bmp_image(data, None, permissiveness, &Unstoppable)
    }

    #[test]
    fn decodes_minimal_24bit() {
        let data = raw_bmp(1, 1, 24, 0, &[0xff, 0x00, 0x00, 0x00]);
        let img = decode(&data, BmpPermissiveness::Lenient).unwrap();
        assert_eq!(img.width(), 1);
        assert_eq!(img.height(), 1);
        assert_eq!(img.layout(), PixelLayout::Bgr8);
        assert_eq!(img.row_order(), RowOrder::BottomUp);
        assert_eq!(img.pixels(), &[0xff, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn negative_height_is_top_down() {
        let data = raw_bmp(1, -2, 32, 0, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let img = decode(&data, BmpPermissiveness::Lenient).unwrap();
        assert_eq!(img.height(), 2);
        assert_eq!(img.row_order(), RowOrder::TopDown);
        assert_eq!(img.layout(), PixelLayout::Bgra8);
        assert_eq!(img.pixels(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn bad_signature_rejected() {
        let mut data = raw_bmp(1, 1, 24, 0, &[0; 4]);
        data[0] = b'P';
        let err = decode(&data, BmpPermissiveness::Lenient).unwrap_err();
        assert!(matches!(err, BitmapError::UnrecognizedFormat));
        assert!(err.is_format_error());
    }

    #[test]
    fn unsupported_bit_depths_rejected() {
        for bpp in [1u16, 4, 8, 16, 48] {
            let data = raw_bmp(1, 1, bpp, 0, &[0; 8]);
            let err = decode(&data, BmpPermissiveness::Lenient).unwrap_err();
            assert!(
                matches!(err, BitmapError::UnsupportedVariant(_)),
                "{bpp}-bit accepted: {err:?}"
            );
        }
    }

    #[test]
    fn compressed_rejected() {
        for compression in [1u32, 2, 3] {
            let data = raw_bmp(1, 1, 24, compression, &[0; 4]);
            let err = decode(&data, BmpPermissiveness::Lenient).unwrap_err();
            assert!(err.is_format_error());
        }
    }

    #[test]
    fn truncated_header_rejected() {
        let data = raw_bmp(1, 1, 24, 0, &[0; 4]);
        for len in [0, 1, 2, 13, 14, 30, 53] {
            let err = decode(&data[..len], BmpPermissiveness::Lenient).unwrap_err();
            assert!(err.is_format_error(), "len {len}: {err:?}");
        }
    }

    #[test]
    fn zero_width_rejected() {
        let data = raw_bmp(0, 1, 24, 0, &[]);
        assert!(matches!(
            decode(&data, BmpPermissiveness::Lenient),
            Err(BitmapError::InvalidHeader(_))
        ));
        let data = raw_bmp(-3, 1, 24, 0, &[0; 12]);
        assert!(matches!(
            decode(&data, BmpPermissiveness::Lenient),
            Err(BitmapError::InvalidHeader(_))
        ));
    }

    #[test]
    fn truncated_pixels_lenient_zero_fills() {
        // 2x2 24-bit: stride 8, 16 bytes expected, only 10 present
        let data = raw_bmp(2, 2, 24, 0, &[9; 10]);
        let img = decode(&data, BmpPermissiveness::Lenient).unwrap();
        assert_eq!(img.pixels().len(), 16);
        assert_eq!(&img.pixels()[..10], &[9; 10]);
        assert_eq!(&img.pixels()[10..], &[0; 6]);
    }

    #[test]
    fn truncated_pixels_strict_fails() {
        let data = raw_bmp(2, 2, 24, 0, &[9; 10]);
        let err = decode(&data, BmpPermissiveness::Strict).unwrap_err();
        assert!(matches!(err, BitmapError::UnexpectedEof));
    }

    #[test]
    fn pixel_offset_past_end() {
        let mut data = raw_bmp(1, 1, 24, 0, &[7; 4]);
        data[10..14].copy_from_slice(&1000u32.to_le_bytes());
        let img = decode(&data, BmpPermissiveness::Lenient).unwrap();
        assert_eq!(img.pixels(), &[0; 4]);
        assert!(decode(&data, BmpPermissiveness::Strict).is_err());
    }

    #[test]
    fn pixel_offset_is_honoured() {
        // Two junk bytes between header and pixels.
        let mut data = raw_bmp(1, 1, 24, 0, &[0xaa, 0xbb, 1, 2, 3, 0]);
        data[10..14].copy_from_slice(&56u32.to_le_bytes());
        let img = decode(&data, BmpPermissiveness::Strict).unwrap();
        assert_eq!(img.pixels(), &[1, 2, 3, 0]);
    }

    #[test]
    fn v5_header_extension_kept() {
        let mut data = raw_bmp(1, 1, 32, 0, &[]);
        data[14..18].copy_from_slice(&124u32.to_le_bytes());
        data[10..14].copy_from_slice(&138u32.to_le_bytes());
        data.extend((0..84).map(|i| i as u8));
        data.extend_from_slice(&[1, 2, 3, 4]);
        let img = decode(&data, BmpPermissiveness::Strict).unwrap();
        assert_eq!(img.info_extension().len(), 84);
        assert_eq!(img.info_extension()[83], 83);
        assert_eq!(img.pixels(), &[1, 2, 3, 4]);
    }

    #[test]
    fn small_info_header_rejected() {
        let mut data = raw_bmp(1, 1, 24, 0, &[0; 4]);
        data[14..18].copy_from_slice(&12u32.to_le_bytes());
        assert!(matches!(
            decode(&data, BmpPermissiveness::Lenient),
            Err(BitmapError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn header_only_file_with_huge_dimensions_fails() {
        for bpp in [24, 32] {
            let data = raw_bmp(i32::MAX, i32::MAX, bpp, 0, &[]);
            assert_eq!(data.len(), 54);
            let err = decode(&data, BmpPermissiveness::Lenient).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::Format | ErrorKind::Limit),
                "{bpp}-bit: {err:?}"
            );
            assert!(decode(&data, BmpPermissiveness::Strict).is_err());
        }
    }

    #[test]
    fn lenient_fill_is_bounded() {
        // 8192x4096 32-bit claims 128 MiB of pixels with only 16 present
        let data = raw_bmp(8192, 4096, 32, 0, &[1; 16]);
        assert!(matches!(
            decode(&data, BmpPermissiveness::Lenient),
            Err(BitmapError::UnexpectedEof)
        ));

        // half the pixel data present is still zero-filled
        let data = raw_bmp(8, 8, 32, 0, &[1; 128]);
        let img = decode(&data, BmpPermissiveness::Lenient).unwrap();
        assert_eq!(&img.pixels()[..128], &[1; 128]);
        assert_eq!(&img.pixels()[128..], &[0; 128]);
    }

    #[test]
    fn limits_checked_before_allocation() {
        let data = raw_bmp(100_000, 100_000, 24, 0, &[]);
        let limits = Limits {
            max_memory_bytes: Some(1 << 20),
            ..Default::default()
        };
        let err =
            decode_bmp_image(&data, Some(&limits), BmpPermissiveness::Lenient, &Unstoppable)
                .unwrap_err();
        assert!(matches!(err, BitmapError::LimitExceeded(_)));
    }
}
