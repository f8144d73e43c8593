//! Palette construction for indexed (color-mapped) output.

use alloc::vec::Vec;
use enough::Stop;

use crate::error::TgaError;
use crate::pixel;

/// Deduplicated color table plus the per-pixel index buffer, both
/// encode-scoped.
pub(crate) struct Palette {
    /// Entries in file-native B,G,R[,A] order, `channels` bytes each.
    pub entries: Vec<u8>,
    /// One palette slot per pixel.
    pub indices: Vec<u8>,
}

/// Build a palette by linear scan over the canonical pixels.
///
/// Each pixel is compared whole-tuple against the accepted entries in
/// insertion order; the first match wins and a miss appends. That keeps index
/// assignment deterministic and reproducible bit-for-bit, at the cost of an
/// O(pixels × palette) scan whose inner loop is bounded by the 256-entry cap.
/// A 257th distinct color fails with [`TgaError::PaletteOverflow`].
pub(crate) fn build_palette(
    pixels: &[u8],
    channels: usize,
    stop: &dyn Stop,
) -> Result<Palette, TgaError> {
    let mut entries: Vec<u8> = Vec::with_capacity(256 * channels);
    let mut indices = Vec::with_capacity(pixels.len() / channels);

    for (n, pix) in pixels.chunks_exact(channels).enumerate() {
        if n % 4096 == 0 {
            stop.check()?;
        }
        match entries.chunks_exact(channels).position(|entry| entry == pix) {
            Some(slot) => indices.push(slot as u8),
            None => {
                let slot = entries.len() / channels;
                if slot == 256 {
                    return Err(TgaError::PaletteOverflow);
                }
                indices.push(slot as u8);
                entries.extend_from_slice(pix);
            }
        }
    }

    // Entries were collected in canonical order; rewrite to file-native
    // B,G,R[,A] exactly once on emission.
    pixel::swap_rb(&mut entries, channels);

    Ok(Palette { entries, indices })
}
