//! Key-number embedding.
//!
//! The key number that produced a ciphertext rides in the high bits of
//! the first core symbol's digit value: the symbol at digit `d` becomes
//! the symbol at `d + (k << bits)`. With `bits` of 0 only key number 0 is
//! representable and the symbol is left untouched.

use ffx::alphabet::Alphabet;

use crate::error::{Error, Result};

/// Fold key number `k` into the first symbol of `core` (output-alphabet
/// domain).
pub(crate) fn embed(
    output: &Alphabet,
    core: &mut [char],
    k: usize,
    bits: u32,
) -> Result<()> {
    if bits == 0 {
        return Ok(());
    }
    let first = core.first_mut().ok_or(Error::FormatMismatch)?;
    let d = output.digit(*first)?;
    let e = d + (k << bits);
    *first = output.symbol(e).map_err(|_| {
        Error::AlphabetTooSmall(format!(
            "digit {d} with key number {k} shifted by {bits} bits exceeds \
             the output radix {}",
            output.radix()
        ))
    })?;
    Ok(())
}

/// Recover the key number from the first symbol of `core`, restoring the
/// symbol to its bare digit.
pub(crate) fn extract(
    output: &Alphabet,
    core: &mut [char],
    bits: u32,
) -> Result<usize> {
    if bits == 0 {
        return Ok(0);
    }
    let first = core.first_mut().ok_or(Error::FormatMismatch)?;
    let e = output.digit(*first)?;
    let k = e >> bits;
    let d = e - (k << bits);
    *first = output.symbol(d)?;
    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base32() -> Alphabet {
        Alphabet::new("0123456789ABCDEFGHIJKLMNOPQRSTUV").unwrap()
    }

    #[test]
    fn embeds_and_extracts_every_key() {
        let out = base32();
        for k in 0..4 {
            let mut core: Vec<char> = "0123".chars().collect();
            embed(&out, &mut core, k, 3).unwrap();
            assert_eq!(core[0], out.symbol(k << 3).unwrap());
            assert_eq!(&core[1..], &['1', '2', '3']);

            let got = extract(&out, &mut core, 3).unwrap();
            assert_eq!(got, k);
            assert_eq!(core, "0123".chars().collect::<Vec<_>>());
        }
    }

    #[test]
    fn zero_bits_is_the_identity() {
        let out = base32();
        let mut core: Vec<char> = "V123".chars().collect();
        embed(&out, &mut core, 0, 0).unwrap();
        assert_eq!(core[0], 'V');
        assert_eq!(extract(&out, &mut core, 0).unwrap(), 0);
        assert_eq!(core[0], 'V');
    }

    #[test]
    fn overflowing_embed_reports_small_alphabet() {
        let out = base32();
        let mut core: Vec<char> = "7000".chars().collect();
        // digit 7 + (4 << 3) = 39, past radix 32
        let err = embed(&out, &mut core, 4, 3).unwrap_err();
        assert!(matches!(err, Error::AlphabetTooSmall(_)));
    }
}
