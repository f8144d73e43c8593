//! # zentga
//!
//! TGA (Truevision Targa) image format decoder and encoder.
//!
//! ## Canonical Pixels
//!
//! Every decode produces — and every encode consumes — one in-memory
//! representation: interleaved R,G,B or R,G,B,A at 8 bits per channel,
//! row-major, top-to-bottom ([`Image`]). The file-side formats (indexed,
//! packed 15/16-bit, 24/32-bit true color, 8/16-bit grayscale, raw or
//! run-length encoded) all transcode through it, so
//! `decode(encode(image, v))` returns the pixels byte-for-byte for any image
//! that variant `v` can represent exactly.
//!
//! ## Supported Variants
//!
//! - **Color-mapped** — 8-bit indices over a ≤256-entry color map
//! - **True-color** — 24/32-bit B,G,R[,A], or packed 15/16-bit 5-5-5[+A]
//! - **Grayscale** — 16-bit luminance+alpha, or 8-bit luminance
//! - Run-length encoded twins of all of the above
//!
//! ## Non-Goals
//!
//! - The TGA 2.0 footer, extension, and developer areas — never read, never
//!   written
//! - Color management and resampling (use a dedicated crate for that)
//!
//! ## Usage
//!
//! ```no_run
//! use zentga::{DecodeRequest, EncodeRequest, TgaVariant, Unstoppable};
//!
//! let data: &[u8] = &[]; // your TGA bytes
//!
//! // Probe without decoding
//! let info = zentga::TgaInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.variant);
//!
//! // Decode
//! let image = DecodeRequest::new().from_bytes(data, Unstoppable)?;
//!
//! // Re-encode with run-length compression
//! let rle = EncodeRequest::new(TgaVariant::TrueColorRle)
//!     .to_bytes(&image, Unstoppable)?;
//! # Ok::<(), zentga::TgaError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod encode;
mod error;
mod header;
mod image;
mod info;
mod limits;
mod palette;
mod pixel;
mod rle;
mod stream;

// Re-exports
pub use decode::{DecodeRequest, decode, decode_bytes};
#[cfg(feature = "std")]
pub use decode::decode_file;
pub use encode::{EncodeRequest, TgaVariant, encode, encode_bytes};
#[cfg(feature = "std")]
pub use encode::encode_file;
pub use enough::{Stop, Unstoppable};
pub use error::TgaError;
#[cfg(feature = "rgb")]
pub use image::CanonicalPixel;
pub use image::Image;
pub use info::TgaInfo;
pub use limits::Limits;
pub use pixel::PixelLayout;
#[cfg(feature = "std")]
pub use stream::FileStream;
pub use stream::{MemStream, SeekFrom, Stream, VecStream};
