#![no_main]
use libfuzzer_sys::fuzz_target;
use zentga::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding in the same variant and decoding
    // again must produce identical pixels: the canonical form is exactly
    // what each variant can represent.
    let Ok(decoded) = decode_bytes(data, enough::Unstoppable) else {
        return;
    };
    let Ok(info) = TgaInfo::from_bytes(data) else {
        return;
    };

    let Ok(reencoded) = encode_bytes(&decoded, info.variant, enough::Unstoppable) else {
        return;
    };
    let decoded2 =
        decode_bytes(&reencoded, enough::Unstoppable).expect("re-encoded data failed to decode");

    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    assert_eq!(decoded.layout(), decoded2.layout());
});
