use alloc::string::String;
use enough::StopReason;

/// Errors from TGA decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TgaError {
    #[error("failed to open stream: {0}")]
    OpenFailed(String),

    #[error("stream read failed or returned fewer bytes than requested")]
    ReadFailed,

    #[error("stream write failed or accepted fewer bytes than requested")]
    WriteFailed,

    #[error("invalid TGA header: {0}")]
    InvalidFormat(String),

    #[error("unsupported TGA variant: {0}")]
    UnsupportedVariant(String),

    #[error("pixel data ends before the header-declared amount")]
    TruncatedStream,

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("indexed output requires more than 256 distinct colors")]
    PaletteOverflow,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for TgaError {
    fn from(r: StopReason) -> Self {
        TgaError::Cancelled(r)
    }
}
