use crate::error::BitmapError;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the pixel buffer allocation, row padding included.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check image dimensions and the padded pixel buffer size against the
    /// configured bounds.
    pub(crate) fn check(
        &self,
        width: u32,
        height: u32,
        buffer_bytes: usize,
    ) -> Result<(), BitmapError> {
        let exceeded = |what: &str, value: u64, max: u64| {
            BitmapError::LimitExceeded(alloc::format!("{what} {value} exceeds limit {max}"))
        };
        let (w, h) = (u64::from(width), u64::from(height));
        match *self {
            Limits { max_width: Some(max), .. } if w > max => Err(exceeded("width", w, max)),
            Limits { max_height: Some(max), .. } if h > max => Err(exceeded("height", h, max)),
            Limits { max_pixels: Some(max), .. } if w * h > max => {
                Err(exceeded("pixel count", w * h, max))
            }
            Limits { max_memory_bytes: Some(max), .. } if buffer_bytes as u64 > max => {
                Err(exceeded("pixel buffer bytes", buffer_bytes as u64, max))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn default_is_unbounded() {
        let limits = Limits::default();
        assert!(limits.check(u32::MAX, u32::MAX, usize::MAX).is_ok());
    }

    #[test]
    fn pixel_count_limit() {
        let limits = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(limits.check(10, 10, 0).is_ok());
        let err = limits.check(10, 11, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Limit);
    }

    #[test]
    fn width_and_height_limits() {
        let limits = Limits {
            max_width: Some(4),
            max_height: Some(2),
            ..Default::default()
        };
        assert!(limits.check(4, 2, 0).is_ok());
        assert!(limits.check(5, 1, 0).is_err());
        assert!(limits.check(1, 3, 0).is_err());
    }

    #[test]
    fn memory_limit_counts_padding() {
        let limits = Limits {
            max_memory_bytes: Some(8),
            ..Default::default()
        };
        // 1x2 24-bit is 6 pixel bytes but 8 stored bytes
        assert!(limits.check(1, 2, 8).is_ok());
        assert!(limits.check(1, 3, 12).is_err());
    }
}
