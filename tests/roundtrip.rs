use enough::Unstoppable;
use zentga::*;

#[test]
fn truecolor_roundtrip_rgb8() {
    let w = 4;
    let h = 3;
    let mut pixels = vec![0u8; w * h * 3];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * 3;
            if (x + y) % 2 == 0 {
                pixels[off] = 255;
                pixels[off + 1] = 0;
                pixels[off + 2] = 128;
            } else {
                pixels[off] = 0;
                pixels[off + 1] = 200;
                pixels[off + 2] = 50;
            }
        }
    }

    let image = Image::new(w as u32, h as u32, PixelLayout::Rgb8, pixels.clone()).unwrap();
    let encoded = encode_bytes(&image, TgaVariant::TrueColor, Unstoppable).unwrap();

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.width(), w as u32);
    assert_eq!(decoded.height(), h as u32);
    assert_eq!(decoded.layout(), PixelLayout::Rgb8);
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn truecolor_roundtrip_rgba8() {
    let w = 2;
    let h = 2;
    let pixels = vec![
        255, 0, 0, 255, // red
        0, 255, 0, 128, // green semi-transparent
        0, 0, 255, 0, // blue transparent
        128, 128, 128, 255, // gray
    ];

    let image = Image::new(w, h, PixelLayout::Rgba8, pixels.clone()).unwrap();
    let encoded = encode_bytes(&image, TgaVariant::TrueColor, Unstoppable).unwrap();

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgba8);
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn truecolor_rle_roundtrip() {
    // Rows mixing runs and literal stretches exercise both packet kinds.
    let w = 8;
    let h = 4;
    let mut pixels = vec![0u8; w * h * 3];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * 3;
            let v = if x < 4 { 10 } else { (x * 40 + y) as u8 };
            pixels[off] = v;
            pixels[off + 1] = v.wrapping_add(3);
            pixels[off + 2] = (y * 60) as u8;
        }
    }

    let image = Image::new(w as u32, h as u32, PixelLayout::Rgb8, pixels.clone()).unwrap();
    let encoded = encode_bytes(&image, TgaVariant::TrueColorRle, Unstoppable).unwrap();

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn truecolor16_roundtrip_rgb8() {
    // 5-bit-clean channel values survive the packed form exactly.
    let w = 3;
    let h = 2;
    let pixels = vec![
        248, 0, 0, 0, 248, 0, 0, 0, 248, //
        64, 128, 192, 8, 16, 24, 0, 0, 0,
    ];

    let image = Image::new(w, h, PixelLayout::Rgb8, pixels.clone()).unwrap();
    let encoded = encode_bytes(&image, TgaVariant::TrueColor16, Unstoppable).unwrap();
    assert_eq!(encoded[16], 15, "3-channel packed output is 15-bit");

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgb8);
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn truecolor16_rle_roundtrip_rgba8() {
    // Alpha must be fully transparent or fully opaque to survive the
    // one-bit alpha flag.
    let w = 4;
    let h = 2;
    let pixels = vec![
        248, 0, 0, 0, 248, 0, 0, 0, 248, 0, 0, 0, 64, 96, 32, 255, //
        0, 0, 0, 255, 8, 248, 80, 255, 8, 248, 80, 255, 8, 248, 80, 0,
    ];

    let image = Image::new(w, h, PixelLayout::Rgba8, pixels.clone()).unwrap();
    let encoded = encode_bytes(&image, TgaVariant::TrueColor16Rle, Unstoppable).unwrap();
    assert_eq!(encoded[16], 16, "4-channel packed output is 16-bit");

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgba8);
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn colormapped_roundtrip() {
    let w = 4;
    let h = 4;
    let palette: [[u8; 3]; 3] = [[250, 1, 2], [3, 240, 5], [6, 7, 230]];
    let mut pixels = Vec::with_capacity(w * h * 3);
    for i in 0..(w * h) {
        pixels.extend_from_slice(&palette[i % 3]);
    }

    let image = Image::new(w as u32, h as u32, PixelLayout::Rgb8, pixels.clone()).unwrap();
    let encoded = encode_bytes(&image, TgaVariant::ColorMapped, Unstoppable).unwrap();
    assert_eq!(encoded[1], 1, "color map flag");
    assert_eq!(encoded[2], 1, "color-mapped image type");

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn colormapped_rle_roundtrip_rgba8() {
    let w = 6;
    let h = 3;
    let palette: [[u8; 4]; 4] = [
        [250, 1, 2, 255],
        [3, 240, 5, 128],
        [6, 7, 230, 0],
        [9, 10, 11, 255],
    ];
    let mut pixels = Vec::with_capacity(w * h * 4);
    for i in 0..(w * h) {
        // Long stretches of one entry followed by alternation.
        let slot = if i % 6 < 3 { 0 } else { i % 4 };
        pixels.extend_from_slice(&palette[slot]);
    }

    let image = Image::new(w as u32, h as u32, PixelLayout::Rgba8, pixels.clone()).unwrap();
    let encoded = encode_bytes(&image, TgaVariant::ColorMappedRle, Unstoppable).unwrap();

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgba8);
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn palette_is_deterministic() {
    let w = 16;
    let h = 16;
    let mut pixels = vec![0u8; w * h * 3];
    let mut state: u32 = 0xDEAD_BEEF;
    for pix in pixels.chunks_exact_mut(3) {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        // Limit to 32 distinct colors so indexed output succeeds.
        pix[0] = (state % 32) as u8 * 8;
        pix[1] = 0;
        pix[2] = 77;
    }

    let image = Image::new(w as u32, h as u32, PixelLayout::Rgb8, pixels).unwrap();
    let first = encode_bytes(&image, TgaVariant::ColorMapped, Unstoppable).unwrap();
    let second = encode_bytes(&image, TgaVariant::ColorMapped, Unstoppable).unwrap();
    assert_eq!(first, second, "palette order and indices must be stable");

    let first_rle = encode_bytes(&image, TgaVariant::ColorMappedRle, Unstoppable).unwrap();
    let second_rle = encode_bytes(&image, TgaVariant::ColorMappedRle, Unstoppable).unwrap();
    assert_eq!(first_rle, second_rle);
}

#[test]
fn grayscale_roundtrip_rgba8() {
    // 16-bit grayscale: luminance survives when R=G=B, alpha byte verbatim.
    let w = 3;
    let h = 2;
    let pixels = vec![
        0, 0, 0, 0, 100, 100, 100, 37, 255, 255, 255, 255, //
        17, 17, 17, 200, 92, 92, 92, 1, 180, 180, 180, 0,
    ];

    let image = Image::new(w, h, PixelLayout::Rgba8, pixels.clone()).unwrap();
    let encoded = encode_bytes(&image, TgaVariant::Grayscale, Unstoppable).unwrap();
    assert_eq!(encoded[2], 3, "grayscale image type");
    assert_eq!(encoded[16], 16);

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgba8);
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn grayscale_rle_roundtrip() {
    let w = 10;
    let h = 2;
    let mut pixels = Vec::with_capacity(w * h * 4);
    for i in 0..(w * h) {
        let lum = if i % 10 < 6 { 40 } else { (i * 11) as u8 };
        pixels.extend_from_slice(&[lum, lum, lum, 255]);
    }

    let image = Image::new(w as u32, h as u32, PixelLayout::Rgba8, pixels.clone()).unwrap();
    let encoded = encode_bytes(&image, TgaVariant::GrayscaleRle, Unstoppable).unwrap();

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn grayscale8_roundtrip() {
    let w = 4;
    let h = 2;
    let pixels = vec![
        0, 0, 0, 10, 10, 10, 200, 200, 200, 255, 255, 255, //
        33, 33, 33, 33, 33, 33, 90, 90, 90, 120, 120, 120,
    ];

    let image = Image::new(w, h, PixelLayout::Rgb8, pixels.clone()).unwrap();
    let encoded = encode_bytes(&image, TgaVariant::Grayscale8, Unstoppable).unwrap();
    assert_eq!(encoded[16], 8);

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgb8);
    assert_eq!(decoded.pixels(), &pixels[..]);

    let rle = encode_bytes(&image, TgaVariant::Grayscale8Rle, Unstoppable).unwrap();
    let decoded_rle = decode_bytes(&rle, Unstoppable).unwrap();
    assert_eq!(decoded_rle.pixels(), &pixels[..]);
}

#[test]
fn grayscale8_drops_alpha() {
    // No alpha byte exists at 8 bits; encoding a 4-channel image is lossy.
    let pixels = vec![50, 50, 50, 7, 80, 80, 80, 200];
    let image = Image::new(2, 1, PixelLayout::Rgba8, pixels).unwrap();

    let encoded = encode_bytes(&image, TgaVariant::Grayscale8, Unstoppable).unwrap();
    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgb8);
    assert_eq!(decoded.pixels(), &[50, 50, 50, 80, 80, 80]);
}

#[test]
fn rle_run_packet_exact_bytes() {
    // Two identical true-color pixels must produce exactly one run packet of
    // count 2, storing the pixel in file order (B,G,R).
    let pixels = vec![255, 0, 0, 255, 0, 0];
    let image = Image::new(2, 1, PixelLayout::Rgb8, pixels.clone()).unwrap();

    let encoded = encode_bytes(&image, TgaVariant::TrueColorRle, Unstoppable).unwrap();
    assert_eq!(encoded[2], 10, "run-length true-color image type");
    assert_eq!(encoded[16], 24);
    assert_eq!(encoded.len(), 18 + 4);
    assert_eq!(&encoded[18..], &[0x81, 0, 0, 255]);

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn packed16_alpha_bit_exact_bytes() {
    // (248,0,0) with alpha 0 packs to 0b0_11111_00000_00000 — alpha bit clear.
    let image = Image::new(1, 1, PixelLayout::Rgba8, vec![248, 0, 0, 0]).unwrap();

    let encoded = encode_bytes(&image, TgaVariant::TrueColor16, Unstoppable).unwrap();
    assert_eq!(encoded.len(), 18 + 2);
    assert_eq!(&encoded[18..], &0x7C00u16.to_le_bytes());

    let decoded = decode_bytes(&encoded, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &[248, 0, 0, 0]);
}

#[test]
fn flip_horizontally_mirrors_rows() {
    let pixels = vec![
        1, 2, 3, 4, 5, 6, //
        7, 8, 9, 10, 11, 12,
    ];
    let mut image = Image::new(2, 2, PixelLayout::Rgb8, pixels.clone()).unwrap();

    image.flip_horizontally();
    assert_eq!(image.pixels(), &[4, 5, 6, 1, 2, 3, 10, 11, 12, 7, 8, 9]);

    image.flip_horizontally();
    assert_eq!(image.pixels(), &pixels[..], "applying twice restores");
}

#[test]
fn flip_vertically_mirrors_columns() {
    let pixels = vec![
        1, 2, 3, 4, 5, 6, //
        7, 8, 9, 10, 11, 12, //
        13, 14, 15, 16, 17, 18,
    ];
    let mut image = Image::new(2, 3, PixelLayout::Rgb8, pixels.clone()).unwrap();

    image.flip_vertically();
    assert_eq!(
        image.pixels(),
        &[13, 14, 15, 16, 17, 18, 7, 8, 9, 10, 11, 12, 1, 2, 3, 4, 5, 6]
    );

    image.flip_vertically();
    assert_eq!(image.pixels(), &pixels[..], "applying twice restores");
}

#[test]
fn stream_encode_decode_roundtrip() {
    let pixels = vec![9, 8, 7, 6, 5, 4];
    let image = Image::new(2, 1, PixelLayout::Rgb8, pixels.clone()).unwrap();

    let mut sink = VecStream::new();
    encode(&image, TgaVariant::TrueColor, &mut sink, Unstoppable).unwrap();

    let bytes = sink.into_inner();
    let mut source = MemStream::new(&bytes);
    let decoded = decode(&mut source, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}
