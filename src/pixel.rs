//! Canonical pixel layout and the per-format transforms.
//!
//! Every transform here is stateless and total for in-range input: file-native
//! bytes (B,G,R[,A] order, packed 5-5-5 words, luminance[+alpha] words, or
//! palette indices) on one side, canonical interleaved R,G,B[,A] on the other.

use crate::error::TgaError;

/// Canonical pixel memory layout.
///
/// The codec's single in-memory representation is always 8 bits per channel,
/// interleaved, row-major top-to-bottom.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
}

impl PixelLayout {
    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels()
    }

    /// Whether the layout carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Rgba8)
    }

    pub(crate) fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            3 => Some(Self::Rgb8),
            4 => Some(Self::Rgba8),
            _ => None,
        }
    }
}

/// Swap the first and third byte of every `stride`-byte pixel in place.
///
/// Converts 24/32-bit pixels between file-native B,G,R[,A] and canonical
/// R,G,B[,A]; the transform is its own inverse. Trailing alpha bytes pass
/// through untouched.
pub(crate) fn swap_rb(buf: &mut [u8], stride: usize) {
    for pix in buf.chunks_exact_mut(stride) {
        pix.swap(0, 2);
    }
}

/// Unpack little-endian 5-5-5 words into 8-bit channels.
///
/// Bit 15 is the alpha-presence flag: set means opaque (255). With 3 output
/// channels the flag is ignored. The 5-bit values are widened by a plain
/// `<< 3`, keeping the transform invertible for 5-bit-clean channel values.
pub(crate) fn unpack_packed16(native: &[u8], out: &mut [u8], channels: usize) {
    for (word, pix) in native.chunks_exact(2).zip(out.chunks_exact_mut(channels)) {
        let w = u16::from_le_bytes([word[0], word[1]]);
        pix[0] = (((w >> 10) & 0x1f) << 3) as u8;
        pix[1] = (((w >> 5) & 0x1f) << 3) as u8;
        pix[2] = ((w & 0x1f) << 3) as u8;
        if channels == 4 {
            pix[3] = if w & 0x8000 != 0 { 255 } else { 0 };
        }
    }
}

/// Pack one canonical pixel into a 5-5-5(+alpha-bit) word.
///
/// A 4-channel pixel sets bit 15 iff its alpha is non-zero; a 3-channel pixel
/// always sets it.
pub(crate) fn pack_packed16(pix: &[u8]) -> u16 {
    let mut w = (u16::from(pix[0] >> 3) << 10)
        | (u16::from(pix[1] >> 3) << 5)
        | u16::from(pix[2] >> 3);
    if pix.len() < 4 || pix[3] != 0 {
        w |= 0x8000;
    }
    w
}

/// Luminance of a canonical pixel: `(r + g + b) / 3`, truncating.
pub(crate) fn luminance(pix: &[u8]) -> u8 {
    ((u16::from(pix[0]) + u16::from(pix[1]) + u16::from(pix[2])) / 3) as u8
}

/// Expand little-endian luminance+alpha words to R,G,B,A.
pub(crate) fn unpack_gray16(native: &[u8], out: &mut [u8]) {
    for (word, pix) in native.chunks_exact(2).zip(out.chunks_exact_mut(4)) {
        pix[0] = word[0];
        pix[1] = word[0];
        pix[2] = word[0];
        pix[3] = word[1];
    }
}

/// Pack one canonical pixel into a luminance+alpha word (luminance in the low
/// byte). 3-channel pixels get an opaque alpha byte.
pub(crate) fn pack_gray16(pix: &[u8]) -> u16 {
    let alpha = if pix.len() == 4 { pix[3] } else { 255 };
    u16::from(luminance(pix)) | (u16::from(alpha) << 8)
}

/// Replicate bare luminance bytes into R,G,B.
pub(crate) fn unpack_gray8(native: &[u8], out: &mut [u8]) {
    for (&lum, pix) in native.iter().zip(out.chunks_exact_mut(3)) {
        pix.fill(lum);
    }
}

/// Expand palette indices into canonical pixels.
///
/// Color-map entries are file-native B,G,R[,A]; output is canonical
/// R,G,B[,A]. An index past the end of the map is corrupt data.
pub(crate) fn expand_indexed(
    indices: &[u8],
    map: &[u8],
    channels: usize,
    out: &mut [u8],
) -> Result<(), TgaError> {
    let entries = map.len() / channels;
    for (&index, pix) in indices.iter().zip(out.chunks_exact_mut(channels)) {
        let i = usize::from(index);
        if i >= entries {
            return Err(TgaError::InvalidData(alloc::format!(
                "palette index {i} out of range (color map has {entries} entries)"
            )));
        }
        let entry = &map[i * channels..(i + 1) * channels];
        pix[0] = entry[2];
        pix[1] = entry[1];
        pix[2] = entry[0];
        if channels == 4 {
            pix[3] = entry[3];
        }
    }
    Ok(())
}
