//! The FF1 sample vectors published by NIST for SP 800-38G
//! (AES-128/192/256, radix 10 and radix 36).

use ffx::Result;

const DIGITS: &str = "0123456789";
const BASE36: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

const KEY_128: [u8; 16] = [
    0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88,
    0x09, 0xcf, 0x4f, 0x3c,
];
const KEY_192: [u8; 24] = [
    0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88,
    0x09, 0xcf, 0x4f, 0x3c, 0xef, 0x43, 0x59, 0xd8, 0xd5, 0x80, 0xaa, 0x4f,
];
const KEY_256: [u8; 32] = [
    0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88,
    0x09, 0xcf, 0x4f, 0x3c, 0xef, 0x43, 0x59, 0xd8, 0xd5, 0x80, 0xaa, 0x4f,
    0x7f, 0x03, 0x6d, 0x6f, 0x04, 0xfc, 0x6a, 0x94,
];

const TWEAK_ASCII: [u8; 10] =
    [0x39, 0x38, 0x37, 0x36, 0x35, 0x34, 0x33, 0x32, 0x31, 0x30];
const TWEAK_MIXED: [u8; 11] =
    [0x37, 0x37, 0x37, 0x37, 0x70, 0x71, 0x72, 0x73, 0x37, 0x37, 0x37];

fn check(
    key: &[u8],
    tweak: Option<&[u8]>,
    alphabet: &str,
    pt: &str,
    ct: &str,
) -> Result<()> {
    let ff1 = ffx::ff1::FF1::new(key, tweak, 0, 0, alphabet)?;

    let out = ff1.encrypt(pt, None)?;
    assert_eq!(out, ct, "encrypt mismatch");

    let out = ff1.decrypt(ct, None)?;
    assert_eq!(out, pt, "decrypt mismatch");

    // the one-shot helpers agree with the context
    assert_eq!(ffx::ff1::encrypt(key, tweak, pt, alphabet)?, ct);
    assert_eq!(ffx::ff1::decrypt(key, tweak, ct, alphabet)?, pt);

    Ok(())
}

#[test]
fn sample1_aes128_no_tweak() -> Result<()> {
    check(&KEY_128, None, DIGITS, "0123456789", "2433477484")
}

#[test]
fn sample2_aes128_ascii_tweak() -> Result<()> {
    check(&KEY_128, Some(&TWEAK_ASCII), DIGITS, "0123456789", "6124200773")
}

#[test]
fn sample3_aes128_radix36() -> Result<()> {
    check(
        &KEY_128,
        Some(&TWEAK_MIXED),
        BASE36,
        "0123456789abcdefghi",
        "a9tv40mll9kdu509eum",
    )
}

#[test]
fn sample4_aes192_no_tweak() -> Result<()> {
    check(&KEY_192, None, DIGITS, "0123456789", "2830668132")
}

#[test]
fn sample5_aes192_ascii_tweak() -> Result<()> {
    check(&KEY_192, Some(&TWEAK_ASCII), DIGITS, "0123456789", "2496655549")
}

#[test]
fn sample6_aes192_radix36() -> Result<()> {
    check(
        &KEY_192,
        Some(&TWEAK_MIXED),
        BASE36,
        "0123456789abcdefghi",
        "xbj3kv35jrawxv32ysr",
    )
}

#[test]
fn sample7_aes256_no_tweak() -> Result<()> {
    check(&KEY_256, None, DIGITS, "0123456789", "6657667009")
}

#[test]
fn sample8_aes256_ascii_tweak() -> Result<()> {
    check(&KEY_256, Some(&TWEAK_ASCII), DIGITS, "0123456789", "1001623463")
}

#[test]
fn sample9_aes256_radix36() -> Result<()> {
    check(
        &KEY_256,
        Some(&TWEAK_MIXED),
        BASE36,
        "0123456789abcdefghi",
        "xs8a0azh2avyalyzuwd",
    )
}

#[test]
fn long_input_round_trips() -> Result<()> {
    // long enough to drive the counter-extension path in the round function
    let pt: String = std::iter::repeat("0123456789").take(40).collect();
    let ff1 = ffx::ff1::FF1::new(&KEY_128, None, 0, 0, DIGITS)?;
    let ct = ff1.encrypt(&pt, None)?;
    assert_eq!(ct.len(), pt.len());
    assert_ne!(ct, pt);
    assert_eq!(ff1.decrypt(&ct, None)?, pt);
    Ok(())
}
