//! The fixed 18-byte TGA header: parsing, serialization, subtype dispatch.

use alloc::vec::Vec;

use crate::error::TgaError;
use crate::stream::{SeekFrom, Stream};

pub(crate) const HEADER_LEN: usize = 18;

/// Image-type code stored at header byte 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ImageType {
    ColorMapped,
    TrueColor,
    Grayscale,
    ColorMappedRle,
    TrueColorRle,
    GrayscaleRle,
}

impl ImageType {
    /// Code 0 ("no image data") is the only immediately-fatal header value;
    /// codes outside the known set are unsupported rather than malformed.
    pub(crate) fn from_code(code: u8) -> Result<Self, TgaError> {
        match code {
            0 => Err(TgaError::InvalidFormat(
                "image type 0 carries no image data".into(),
            )),
            1 => Ok(Self::ColorMapped),
            2 => Ok(Self::TrueColor),
            3 => Ok(Self::Grayscale),
            9 => Ok(Self::ColorMappedRle),
            10 => Ok(Self::TrueColorRle),
            11 => Ok(Self::GrayscaleRle),
            other => Err(TgaError::UnsupportedVariant(alloc::format!(
                "image type code {other}"
            ))),
        }
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            Self::ColorMapped => 1,
            Self::TrueColor => 2,
            Self::Grayscale => 3,
            Self::ColorMappedRle => 9,
            Self::TrueColorRle => 10,
            Self::GrayscaleRle => 11,
        }
    }

    pub(crate) fn is_rle(self) -> bool {
        matches!(
            self,
            Self::ColorMappedRle | Self::TrueColorRle | Self::GrayscaleRle
        )
    }

    fn name(self) -> &'static str {
        match self {
            Self::ColorMapped | Self::ColorMappedRle => "color-mapped",
            Self::TrueColor | Self::TrueColorRle => "true-color",
            Self::Grayscale | Self::GrayscaleRle => "grayscale",
        }
    }
}

/// Parsed header fields, decode/encode scoped.
#[derive(Clone, Debug)]
pub(crate) struct TgaHeader {
    pub id_length: u8,
    pub has_color_map: bool,
    pub image_type: ImageType,
    /// Parsed for completeness; lookup always starts at slot 0.
    pub map_first_index: u16,
    pub map_length: u16,
    pub map_entry_bits: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub descriptor: u8,
}

impl TgaHeader {
    /// Read and parse the fixed header, then skip the optional id field
    /// (its bytes are never retained).
    pub(crate) fn read(stream: &mut dyn Stream) -> Result<Self, TgaError> {
        let mut raw = [0u8; HEADER_LEN];
        stream.read_exact(&mut raw)?;
        let header = Self::parse(&raw)?;
        if header.id_length > 0 {
            stream.seek(SeekFrom::Current(i64::from(header.id_length)))?;
        }
        Ok(header)
    }

    pub(crate) fn parse(raw: &[u8; HEADER_LEN]) -> Result<Self, TgaError> {
        let image_type = ImageType::from_code(raw[2])?;
        Ok(Self {
            id_length: raw[0],
            has_color_map: raw[1] != 0,
            image_type,
            map_first_index: u16::from_le_bytes([raw[3], raw[4]]),
            map_length: u16::from_le_bytes([raw[5], raw[6]]),
            map_entry_bits: raw[7],
            x_origin: u16::from_le_bytes([raw[8], raw[9]]),
            y_origin: u16::from_le_bytes([raw[10], raw[11]]),
            width: u16::from_le_bytes([raw[12], raw[13]]),
            height: u16::from_le_bytes([raw[14], raw[15]]),
            bits_per_pixel: raw[16],
            descriptor: raw[17],
        })
    }

    /// Serialize the 18 wire bytes, multi-byte fields explicitly
    /// little-endian regardless of host order.
    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.push(self.id_length);
        out.push(u8::from(self.has_color_map));
        out.push(self.image_type.code());
        out.extend_from_slice(&self.map_first_index.to_le_bytes());
        out.extend_from_slice(&self.map_length.to_le_bytes());
        out.push(self.map_entry_bits);
        out.extend_from_slice(&self.x_origin.to_le_bytes());
        out.extend_from_slice(&self.y_origin.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.push(self.bits_per_pixel);
        out.push(self.descriptor);
    }

    /// Bytes per color-map entry, by the wire rule `entry_bits / 8`.
    pub(crate) fn map_entry_channels(&self) -> usize {
        usize::from(self.map_entry_bits) / 8
    }

    /// Resolve the (image type, bit depth) pairing against the support table.
    pub(crate) fn pixel_format(&self) -> Result<PixelFormat, TgaError> {
        match (self.image_type, self.bits_per_pixel) {
            (ImageType::ColorMapped | ImageType::ColorMappedRle, 8) => {
                if !self.has_color_map {
                    return Err(TgaError::InvalidFormat(
                        "color-mapped image without a color map".into(),
                    ));
                }
                match self.map_entry_bits {
                    24 | 32 => Ok(PixelFormat::Indexed8),
                    other => Err(TgaError::UnsupportedVariant(alloc::format!(
                        "color map entries of {other} bits"
                    ))),
                }
            }
            (ImageType::TrueColor | ImageType::TrueColorRle, 24) => Ok(PixelFormat::TrueColor24),
            (ImageType::TrueColor | ImageType::TrueColorRle, 32) => Ok(PixelFormat::TrueColor32),
            (ImageType::TrueColor | ImageType::TrueColorRle, 15) => Ok(PixelFormat::Packed15),
            (ImageType::TrueColor | ImageType::TrueColorRle, 16) => Ok(PixelFormat::Packed16),
            (ImageType::Grayscale | ImageType::GrayscaleRle, 8) => Ok(PixelFormat::Gray8),
            (ImageType::Grayscale | ImageType::GrayscaleRle, 16) => Ok(PixelFormat::Gray16),
            (image_type, bits) => Err(TgaError::UnsupportedVariant(alloc::format!(
                "{} at {bits} bits per pixel",
                image_type.name()
            ))),
        }
    }
}

/// Supported (subtype, bit depth) pairings and their buffer geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PixelFormat {
    /// 8-bit palette indices; canonical channel count follows the map entries.
    Indexed8,
    /// B,G,R bytes.
    TrueColor24,
    /// B,G,R,A bytes.
    TrueColor32,
    /// Packed 5-5-5 word, alpha bit unused.
    Packed15,
    /// Packed 5-5-5 word plus the alpha presence bit.
    Packed16,
    /// Bare luminance bytes.
    Gray8,
    /// Luminance low byte, alpha high byte.
    Gray16,
}

impl PixelFormat {
    /// Bytes per pixel in the file's pixel stream.
    pub(crate) fn native_stride(self) -> usize {
        match self {
            Self::Indexed8 | Self::Gray8 => 1,
            Self::Packed15 | Self::Packed16 | Self::Gray16 => 2,
            Self::TrueColor24 => 3,
            Self::TrueColor32 => 4,
        }
    }
}
