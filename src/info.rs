//! Header-only probing, no pixel decoding.

use crate::encode::TgaVariant;
use crate::error::TgaError;
use crate::header::{PixelFormat, TgaHeader};
use crate::stream::{MemStream, Stream};

/// Image information read from a TGA header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TgaInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u8,
    /// The variant a re-encode of this file would use.
    pub variant: TgaVariant,
}

impl TgaInfo {
    /// Probe a stream. Consumes the header (and id field) only; pixel data
    /// is never read.
    pub fn from_stream(stream: &mut dyn Stream) -> Result<Self, TgaError> {
        let header = TgaHeader::read(stream)?;
        let format = header.pixel_format()?;
        let rle = header.image_type.is_rle();

        let variant = match (format, rle) {
            (PixelFormat::Indexed8, false) => TgaVariant::ColorMapped,
            (PixelFormat::Indexed8, true) => TgaVariant::ColorMappedRle,
            (PixelFormat::TrueColor24 | PixelFormat::TrueColor32, false) => TgaVariant::TrueColor,
            (PixelFormat::TrueColor24 | PixelFormat::TrueColor32, true) => TgaVariant::TrueColorRle,
            (PixelFormat::Packed15 | PixelFormat::Packed16, false) => TgaVariant::TrueColor16,
            (PixelFormat::Packed15 | PixelFormat::Packed16, true) => TgaVariant::TrueColor16Rle,
            (PixelFormat::Gray8, false) => TgaVariant::Grayscale8,
            (PixelFormat::Gray8, true) => TgaVariant::Grayscale8Rle,
            (PixelFormat::Gray16, false) => TgaVariant::Grayscale,
            (PixelFormat::Gray16, true) => TgaVariant::GrayscaleRle,
        };

        Ok(Self {
            width: u32::from(header.width),
            height: u32::from(header.height),
            bits_per_pixel: header.bits_per_pixel,
            variant,
        })
    }

    /// Probe an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TgaError> {
        Self::from_stream(&mut MemStream::new(data))
    }
}
