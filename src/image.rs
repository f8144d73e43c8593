use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::TgaError;
use crate::pixel::PixelLayout;

/// Decoded image, or pixels prepared by the caller for encoding.
///
/// Pixels are canonical: interleaved R,G,B[,A], 8 bits per channel, row-major
/// top-to-bottom. The buffer length always equals
/// `width * height * channels`; [`Image::new`] enforces this, so every
/// `Image` in circulation holds the invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl Image {
    /// Wrap a canonical pixel buffer.
    ///
    /// Fails if either dimension is zero, the byte count does not equal
    /// `width * height * channels`, or the size arithmetic overflows.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        pixels: Vec<u8>,
    ) -> Result<Self, TgaError> {
        if width == 0 || height == 0 {
            return Err(TgaError::InvalidData(alloc::format!(
                "image dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|wh| wh.checked_mul(layout.bytes_per_pixel()))
            .ok_or(TgaError::DimensionsTooLarge { width, height })?;
        match pixels.len().cmp(&expected) {
            Ordering::Less => Err(TgaError::BufferTooSmall {
                needed: expected,
                actual: pixels.len(),
            }),
            Ordering::Greater => Err(TgaError::InvalidData(alloc::format!(
                "pixel buffer holds {} bytes but {width}x{height} needs exactly {expected}",
                pixels.len()
            ))),
            Ordering::Equal => Ok(Self {
                pixels,
                width,
                height,
                layout,
            }),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Channel count (3 or 4).
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the pixel data.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Mirror every row left-to-right in place.
    ///
    /// Applying the flip twice restores the original image.
    pub fn flip_horizontally(&mut self) {
        let stride = self.layout.bytes_per_pixel();
        let row_bytes = self.width as usize * stride;
        for row in self.pixels.chunks_exact_mut(row_bytes) {
            let mut left = 0;
            let mut right = self.width as usize - 1;
            while left < right {
                for k in 0..stride {
                    row.swap(left * stride + k, right * stride + k);
                }
                left += 1;
                right -= 1;
            }
        }
    }

    /// Mirror the rows top-to-bottom in place.
    ///
    /// Applying the flip twice restores the original image.
    pub fn flip_vertically(&mut self) {
        let row_bytes = self.width as usize * self.layout.bytes_per_pixel();
        let mut scanline = vec![0u8; row_bytes];
        let mid = self.pixels.len() / 2;
        let (top, bottom) = self.pixels.split_at_mut(mid);

        for (upper, lower) in top
            .chunks_exact_mut(row_bytes)
            .zip(bottom.rchunks_exact_mut(row_bytes))
        {
            scanline.copy_from_slice(upper);
            upper.copy_from_slice(lower);
            lower.copy_from_slice(&scanline);
        }
    }

    /// Reinterpret pixel data as a typed pixel slice.
    ///
    /// Returns [`TgaError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: CanonicalPixel>(&self) -> Result<&[P], TgaError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if P::layout() != self.layout {
            return Err(TgaError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Returns [`TgaError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: CanonicalPixel>(&self) -> Result<imgref::ImgRef<'_, P>, TgaError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    ///
    /// Returns [`TgaError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: CanonicalPixel>(&self) -> Result<imgref::ImgVec<P>, TgaError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// Typed pixels a canonical [`Image`] can be viewed as.
#[cfg(feature = "rgb")]
pub trait CanonicalPixel: Copy {
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl CanonicalPixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl CanonicalPixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}
