#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary bytes must never panic
    let _ = zentga::decode_bytes(data, enough::Unstoppable);
    let _ = zentga::TgaInfo::from_bytes(data);
});
