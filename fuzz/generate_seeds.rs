#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fn header(map: u8, image_type: u8, map_spec: [u8; 5], w: u16, h: u16, bpp: u8) -> Vec<u8> {
        let mut raw = vec![0u8, map, image_type];
        raw.extend_from_slice(&map_spec);
        raw.extend_from_slice(&[0, 0, 0, 0]);
        raw.extend_from_slice(&w.to_le_bytes());
        raw.extend_from_slice(&h.to_le_bytes());
        raw.push(bpp);
        raw.push(0);
        raw
    }

    // True-color 2x2 24-bit
    let mut tc = header(0, 2, [0; 5], 2, 2, 24);
    tc.extend_from_slice(&[
        0x00, 0x00, 0xff, 0x00, 0xff, 0x00, //
        0xff, 0x00, 0x00, 0x80, 0x80, 0x80,
    ]);
    fs::write(format!("{dir}/truecolor_2x2.tga"), tc).unwrap();

    // True-color RLE: one run packet of 4
    let mut rle = header(0, 10, [0; 5], 4, 1, 24);
    rle.extend_from_slice(&[0x83, 0x10, 0x20, 0x30]);
    fs::write(format!("{dir}/truecolor_rle_4x1.tga"), rle).unwrap();

    // Packed 16-bit 1x1, alpha bit clear
    let mut packed = header(0, 2, [0; 5], 1, 1, 16);
    packed.extend_from_slice(&0x7C00u16.to_le_bytes());
    fs::write(format!("{dir}/packed16_1x1.tga"), packed).unwrap();

    // Color-mapped 2x1 with a 2-entry 24-bit map
    let mut mapped = header(1, 1, [0, 0, 2, 0, 24], 2, 1, 8);
    mapped.extend_from_slice(&[0xff, 0x00, 0x00, 0x00, 0xff, 0x00]); // map
    mapped.extend_from_slice(&[0, 1]); // indices
    fs::write(format!("{dir}/mapped_2x1.tga"), mapped).unwrap();

    // Grayscale 16-bit 2x1
    let mut gray = header(0, 3, [0; 5], 2, 1, 16);
    gray.extend_from_slice(&[0x40, 0xff, 0xc0, 0x00]);
    fs::write(format!("{dir}/gray16_2x1.tga"), gray).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/short_header.bin"), &header(0, 2, [0; 5], 1, 1, 24)[..10]).unwrap();
    fs::write(format!("{dir}/type_zero.bin"), header(0, 0, [0; 5], 1, 1, 24)).unwrap();
    fs::write(format!("{dir}/rle_truncated.bin"), {
        let mut v = header(0, 10, [0; 5], 4, 1, 24);
        v.extend_from_slice(&[0x83, 0x10]);
        v
    })
    .unwrap();

    println!("Generated seed corpus in {dir}/");
}
