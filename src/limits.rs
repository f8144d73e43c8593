use crate::error::TgaError;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Limits are checked against the
/// header before any pixel allocation happens.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for pixel buffer allocation.
    pub max_memory_bytes: Option<u64>,
}

fn cap(value: u64, limit: Option<u64>, what: &str) -> Result<(), TgaError> {
    match limit {
        Some(max) if value > max => Err(TgaError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Check header dimensions. Returns Ok(()) or LimitExceeded.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), TgaError> {
        cap(u64::from(width), self.max_width, "width")?;
        cap(u64::from(height), self.max_height, "height")?;
        cap(
            u64::from(width) * u64::from(height),
            self.max_pixels,
            "pixel count",
        )
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), TgaError> {
        cap(bytes as u64, self.max_memory_bytes, "allocation of")
    }
}
