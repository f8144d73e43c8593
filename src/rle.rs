//! Run-length packet codec shared by every RLE subtype.
//!
//! A packet starts with one header byte: high bit set means a run (the low 7
//! bits + 1 repeats of a single stored pixel), clear means a raw packet (the
//! low 7 bits + 1 literal pixels). Pixels here are file-native and opaque —
//! the codec only needs their stride (1, 2, 3, or 4 bytes).

use alloc::vec::Vec;
use enough::Stop;

use crate::error::TgaError;
use crate::stream::Stream;

/// Largest pixel count one packet can carry (7-bit count field + 1).
pub(crate) const MAX_PACKET_PIXELS: usize = 128;

const RUN_FLAG: u8 = 0x80;

/// Read pixel-data bytes, mapping a short read to [`TgaError::TruncatedStream`]:
/// past the header, running out of input means the stream ends before the
/// declared amount.
pub(crate) fn read_pixel_bytes(stream: &mut dyn Stream, buf: &mut [u8]) -> Result<(), TgaError> {
    match stream.read_exact(buf) {
        Err(TgaError::ReadFailed) => Err(TgaError::TruncatedStream),
        other => other,
    }
}

/// Decode a packet stream into `out`, which holds a whole number of
/// `stride`-byte pixels.
///
/// Reads exactly as many packets as needed to fill `out` and no further; a
/// packet promising more pixels than remain is corrupt.
pub(crate) fn decode_packets(
    stream: &mut dyn Stream,
    out: &mut [u8],
    stride: usize,
    stop: &dyn Stop,
) -> Result<(), TgaError> {
    let mut pos = 0;
    let mut packets = 0u32;

    while pos < out.len() {
        packets += 1;
        if packets % 1024 == 0 {
            stop.check()?;
        }

        let mut header = [0u8; 1];
        read_pixel_bytes(stream, &mut header)?;
        let count = usize::from(header[0] & 0x7f) + 1;
        let bytes = count * stride;
        if pos + bytes > out.len() {
            return Err(TgaError::InvalidData(alloc::format!(
                "packet of {count} pixels overruns the image"
            )));
        }

        if header[0] & RUN_FLAG != 0 {
            let mut value = [0u8; 4];
            read_pixel_bytes(stream, &mut value[..stride])?;
            for pix in out[pos..pos + bytes].chunks_exact_mut(stride) {
                pix.copy_from_slice(&value[..stride]);
            }
        } else {
            read_pixel_bytes(stream, &mut out[pos..pos + bytes])?;
        }
        pos += bytes;
    }

    Ok(())
}

/// Encode one row of native pixels as packets appended to `out`.
///
/// Runs of two or more stride-equal pixels become run packets, capped at 128.
/// A raw scan stops just before two equal upcoming pixels so they seed the
/// next run scan instead of trailing a duplicate inside the raw packet.
/// Packets never span the row boundary.
pub(crate) fn encode_row(row: &[u8], stride: usize, out: &mut Vec<u8>) {
    let pixels = row.len() / stride;
    let px = |i: usize| &row[i * stride..(i + 1) * stride];

    let mut i = 0;
    while i < pixels {
        let mut run = 1;
        while run < MAX_PACKET_PIXELS && i + run < pixels && px(i + run) == px(i) {
            run += 1;
        }
        if run >= 2 {
            out.push(RUN_FLAG | (run - 1) as u8);
            out.extend_from_slice(px(i));
            i += run;
            continue;
        }

        let start = i;
        let mut len = 1;
        while len < MAX_PACKET_PIXELS && start + len < pixels {
            let next = start + len;
            if next + 1 < pixels && px(next) == px(next + 1) {
                break;
            }
            len += 1;
        }
        out.push((len - 1) as u8);
        out.extend_from_slice(&row[start * stride..(start + len) * stride]);
        i = start + len;
    }
}
