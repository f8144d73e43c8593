//! Encode orchestration: palette → header → pixel data.

use alloc::vec::Vec;
use enough::Stop;

use crate::error::TgaError;
use crate::header::{HEADER_LEN, ImageType, TgaHeader};
use crate::image::Image;
use crate::palette::{self, Palette};
use crate::pixel::{self, PixelLayout};
use crate::rle;
use crate::stream::Stream;

/// Which TGA subtype to write.
///
/// True-color bit depth follows the image's channel count (24/32 for
/// [`TrueColor`](Self::TrueColor), 15/16 for
/// [`TrueColor16`](Self::TrueColor16)). [`Grayscale`](Self::Grayscale) stores
/// a luminance+alpha word per pixel; [`Grayscale8`](Self::Grayscale8) stores
/// a bare luminance byte and silently drops any alpha channel.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TgaVariant {
    /// 8-bit palette indices over a deduplicated color map (≤256 colors).
    ColorMapped,
    /// 24/32-bit B,G,R[,A] bytes.
    TrueColor,
    /// Packed 5-5-5 words, alpha presence bit at 16 bits.
    TrueColor16,
    /// 16-bit luminance+alpha words.
    Grayscale,
    /// 8-bit luminance, lossy for alpha.
    Grayscale8,
    /// Run-length encoded twin of [`ColorMapped`](Self::ColorMapped).
    ColorMappedRle,
    /// Run-length encoded twin of [`TrueColor`](Self::TrueColor).
    TrueColorRle,
    /// Run-length encoded twin of [`TrueColor16`](Self::TrueColor16).
    TrueColor16Rle,
    /// Run-length encoded twin of [`Grayscale`](Self::Grayscale).
    GrayscaleRle,
    /// Run-length encoded twin of [`Grayscale8`](Self::Grayscale8).
    Grayscale8Rle,
}

impl TgaVariant {
    /// Whether the pixel data is run-length encoded.
    pub fn is_rle(self) -> bool {
        matches!(
            self,
            Self::ColorMappedRle
                | Self::TrueColorRle
                | Self::TrueColor16Rle
                | Self::GrayscaleRle
                | Self::Grayscale8Rle
        )
    }

    /// Whether the output carries a color map.
    pub fn is_color_mapped(self) -> bool {
        matches!(self, Self::ColorMapped | Self::ColorMappedRle)
    }

    pub(crate) fn image_type(self) -> ImageType {
        match self {
            Self::ColorMapped => ImageType::ColorMapped,
            Self::TrueColor | Self::TrueColor16 => ImageType::TrueColor,
            Self::Grayscale | Self::Grayscale8 => ImageType::Grayscale,
            Self::ColorMappedRle => ImageType::ColorMappedRle,
            Self::TrueColorRle | Self::TrueColor16Rle => ImageType::TrueColorRle,
            Self::GrayscaleRle | Self::Grayscale8Rle => ImageType::GrayscaleRle,
        }
    }

    pub(crate) fn bits_per_pixel(self, layout: PixelLayout) -> u8 {
        match self {
            Self::ColorMapped | Self::ColorMappedRle => 8,
            Self::TrueColor | Self::TrueColorRle => (layout.channels() * 8) as u8,
            Self::TrueColor16 | Self::TrueColor16Rle => {
                if layout.has_alpha() {
                    16
                } else {
                    15
                }
            }
            Self::Grayscale | Self::GrayscaleRle => 16,
            Self::Grayscale8 | Self::Grayscale8Rle => 8,
        }
    }
}

/// Builder for encode operations.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest {
    variant: TgaVariant,
}

impl EncodeRequest {
    pub fn new(variant: TgaVariant) -> Self {
        Self { variant }
    }

    /// Encode into an in-memory byte vector.
    pub fn to_bytes(&self, image: &Image, stop: impl Stop) -> Result<Vec<u8>, TgaError> {
        encode_to_vec(image, self.variant, &stop)
    }

    /// Encode through any [`Stream`].
    pub fn to_stream(
        &self,
        image: &Image,
        stream: &mut dyn Stream,
        stop: impl Stop,
    ) -> Result<(), TgaError> {
        let bytes = encode_to_vec(image, self.variant, &stop)?;
        stream.write_all(&bytes)
    }

    /// Encode to a file on disk. On failure the file contents are undefined
    /// and should be discarded.
    #[cfg(feature = "std")]
    pub fn to_path(
        &self,
        image: &Image,
        path: impl AsRef<std::path::Path>,
        stop: impl Stop,
    ) -> Result<(), TgaError> {
        let bytes = encode_to_vec(image, self.variant, &stop)?;
        let mut stream = crate::stream::FileStream::create(path)?;
        stream.write_all(&bytes)
    }
}

/// Encode a canonical image through a [`Stream`].
pub fn encode(
    image: &Image,
    variant: TgaVariant,
    stream: &mut dyn Stream,
    stop: impl Stop,
) -> Result<(), TgaError> {
    let bytes = encode_to_vec(image, variant, &stop)?;
    stream.write_all(&bytes)
}

/// Encode a canonical image into a byte vector.
pub fn encode_bytes(
    image: &Image,
    variant: TgaVariant,
    stop: impl Stop,
) -> Result<Vec<u8>, TgaError> {
    encode_to_vec(image, variant, &stop)
}

/// Encode a canonical image to a file. On failure the file contents are
/// undefined and should be discarded.
#[cfg(feature = "std")]
pub fn encode_file(
    image: &Image,
    variant: TgaVariant,
    path: impl AsRef<std::path::Path>,
    stop: impl Stop,
) -> Result<(), TgaError> {
    let bytes = encode_to_vec(image, variant, &stop)?;
    let mut stream = crate::stream::FileStream::create(path)?;
    stream.write_all(&bytes)
}

pub(crate) fn encode_to_vec(
    image: &Image,
    variant: TgaVariant,
    stop: &dyn Stop,
) -> Result<Vec<u8>, TgaError> {
    let width = image.width();
    let height = image.height();
    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        // Header dimension fields are 16-bit.
        return Err(TgaError::DimensionsTooLarge { width, height });
    }

    stop.check()?;

    let channels = image.channels();
    let (map, native, stride) = native_pixels(image, variant, stop)?;

    let (map_length, map_entry_bits) = match &map {
        Some(entries) => ((entries.len() / channels) as u16, (channels * 8) as u8),
        None => (0, 0),
    };

    let header = TgaHeader {
        id_length: 0,
        has_color_map: map.is_some(),
        image_type: variant.image_type(),
        map_first_index: 0,
        map_length,
        map_entry_bits,
        x_origin: 0,
        y_origin: 0,
        width: width as u16,
        height: height as u16,
        bits_per_pixel: variant.bits_per_pixel(image.layout()),
        descriptor: 0,
    };

    // Worst-case RLE growth is one header byte per pixel.
    let map_bytes = map.as_ref().map_or(0, Vec::len);
    let capacity = HEADER_LEN + map_bytes + native.len() + native.len() / stride;
    let mut out = Vec::with_capacity(capacity);
    header.write(&mut out);
    if let Some(entries) = &map {
        out.extend_from_slice(entries);
    }

    if variant.is_rle() {
        let row_bytes = width as usize * stride;
        for (row_idx, row) in native.chunks_exact(row_bytes).enumerate() {
            if row_idx % 16 == 0 {
                stop.check()?;
            }
            rle::encode_row(row, stride, &mut out);
        }
    } else {
        out.extend_from_slice(&native);
    }

    Ok(out)
}

/// Convert the canonical pixels into the variant's file-native stream,
/// returning the color map (indexed output only), the native bytes, and the
/// native pixel stride.
fn native_pixels(
    image: &Image,
    variant: TgaVariant,
    stop: &dyn Stop,
) -> Result<(Option<Vec<u8>>, Vec<u8>, usize), TgaError> {
    let channels = image.channels();
    let pixels = image.pixels();
    let row_canonical = image.width() as usize * channels;

    match variant {
        TgaVariant::ColorMapped | TgaVariant::ColorMappedRle => {
            let Palette { entries, indices } = palette::build_palette(pixels, channels, stop)?;
            Ok((Some(entries), indices, 1))
        }
        TgaVariant::TrueColor | TgaVariant::TrueColorRle => {
            let mut native = pixels.to_vec();
            for (row_idx, row) in native.chunks_exact_mut(row_canonical).enumerate() {
                if row_idx % 16 == 0 {
                    stop.check()?;
                }
                pixel::swap_rb(row, channels);
            }
            Ok((None, native, channels))
        }
        TgaVariant::TrueColor16 | TgaVariant::TrueColor16Rle => {
            let mut native = Vec::with_capacity(pixels.len() / channels * 2);
            for (row_idx, row) in pixels.chunks_exact(row_canonical).enumerate() {
                if row_idx % 16 == 0 {
                    stop.check()?;
                }
                for pix in row.chunks_exact(channels) {
                    native.extend_from_slice(&pixel::pack_packed16(pix).to_le_bytes());
                }
            }
            Ok((None, native, 2))
        }
        TgaVariant::Grayscale | TgaVariant::GrayscaleRle => {
            let mut native = Vec::with_capacity(pixels.len() / channels * 2);
            for (row_idx, row) in pixels.chunks_exact(row_canonical).enumerate() {
                if row_idx % 16 == 0 {
                    stop.check()?;
                }
                for pix in row.chunks_exact(channels) {
                    native.extend_from_slice(&pixel::pack_gray16(pix).to_le_bytes());
                }
            }
            Ok((None, native, 2))
        }
        TgaVariant::Grayscale8 | TgaVariant::Grayscale8Rle => {
            let mut native = Vec::with_capacity(pixels.len() / channels);
            for (row_idx, row) in pixels.chunks_exact(row_canonical).enumerate() {
                if row_idx % 16 == 0 {
                    stop.check()?;
                }
                for pix in row.chunks_exact(channels) {
                    native.push(pixel::luminance(pix));
                }
            }
            Ok((None, native, 1))
        }
    }
}
