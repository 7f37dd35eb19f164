use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, encoding and file access.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("not a BMP file (missing \"BM\" signature)")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported BMP variant: {0}")]
    UnsupportedVariant(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: i64, height: i64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("operation cancelled")]
    Cancelled(StopReason),

    /// The named file could not be opened, read or written.
    #[cfg(feature = "std")]
    #[error("cannot open {}", .path.display())]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`BitmapError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// File missing, unreadable or unwritable.
    Open,
    /// Bad signature, unsupported bit depth or compression, corrupt header.
    Format,
    /// A configured [`crate::Limits`] bound was exceeded.
    Limit,
    Cancelled,
}

impl BitmapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedFormat
            | Self::InvalidHeader(_)
            | Self::UnsupportedVariant(_)
            | Self::UnexpectedEof => ErrorKind::Format,
            Self::DimensionsTooLarge { .. } | Self::LimitExceeded(_) => ErrorKind::Limit,
            Self::Cancelled(_) => ErrorKind::Cancelled,
            #[cfg(feature = "std")]
            Self::Open { .. } => ErrorKind::Open,
        }
    }

    /// Whether the input was rejected as not being a supported BMP.
    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::Format
    }
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
