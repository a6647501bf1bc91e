//! Big-integer radix codec.
//!
//! Treats a symbol string as a numeral, most-significant digit first, in
//! the radix of its alphabet. Values routinely exceed machine-word range
//! (inputs can run to hundreds of symbols), so all arithmetic is done on
//! arbitrary-precision integers.

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::alphabet::Alphabet;
use crate::{Error, Result};

/// Numeric value of `s` in the radix of `alpha`. The empty string is 0.
pub fn string_to_number(alpha: &Alphabet, s: &[char]) -> Result<BigInt> {
    let radix = BigInt::from(alpha.radix());
    let mut n = BigInt::zero();
    for &c in s {
        n = n * &radix + BigInt::from(alpha.digit(c)?);
    }
    Ok(n)
}

/// Render `n` as exactly `len` symbols of `alpha`, left-padded with the
/// zero digit. Fails with `Overflow` when `n >= radix^len`.
pub fn number_to_string(
    alpha: &Alphabet,
    n: &BigInt,
    len: usize,
) -> Result<Vec<char>> {
    let radix = BigInt::from(alpha.radix());
    let mut rem = n.clone();
    let mut out = Vec::with_capacity(len);

    while !rem.is_zero() {
        if out.len() == len {
            return Err(Error::Overflow(len));
        }
        let d = (&rem % &radix)
            .to_usize()
            .ok_or(Error::DigitRange(usize::MAX, alpha.radix()))?;
        out.push(alpha.symbol(d)?);
        rem = rem / &radix;
    }

    while out.len() < len {
        out.push(alpha.symbol(0)?);
    }

    out.reverse();
    Ok(out)
}

/// Re-express `s` in a different alphabet, preserving its length.
pub fn convert(
    src: &Alphabet,
    dst: &Alphabet,
    s: &[char],
) -> Result<Vec<char>> {
    number_to_string(dst, &string_to_number(src, s)?, s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimal() -> Alphabet {
        Alphabet::new("0123456789").unwrap()
    }

    fn hex() -> Alphabet {
        Alphabet::new("0123456789abcdef").unwrap()
    }

    #[test]
    fn round_trips_with_leading_zeros() {
        let a = decimal();
        let s: Vec<char> = "00734".chars().collect();
        let n = string_to_number(&a, &s).unwrap();
        assert_eq!(n, BigInt::from(734u32));
        assert_eq!(number_to_string(&a, &n, 5).unwrap(), s);
    }

    #[test]
    fn empty_string_is_zero() {
        let a = decimal();
        assert!(string_to_number(&a, &[]).unwrap().is_zero());
        assert!(number_to_string(&a, &BigInt::zero(), 0).unwrap().is_empty());
    }

    #[test]
    fn overflow_is_reported() {
        let a = decimal();
        let n = BigInt::from(1000u32);
        assert_eq!(
            number_to_string(&a, &n, 3).unwrap_err(),
            Error::Overflow(3)
        );
    }

    #[test]
    fn cross_alphabet_conversion() {
        let s: Vec<char> = "0f".chars().collect();
        let out = convert(&hex(), &decimal(), &s).unwrap();
        assert_eq!(out, "15".chars().collect::<Vec<_>>());

        // the round trip restores the original symbols
        let back = convert(&decimal(), &hex(), &out).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn conversion_can_overflow_smaller_radix() {
        let s: Vec<char> = "ff".chars().collect();
        assert_eq!(
            convert(&hex(), &decimal(), &s).unwrap_err(),
            Error::Overflow(2)
        );
    }

    #[test]
    fn wide_values_do_not_truncate() {
        let a = decimal();
        let s: Vec<char> = "9".repeat(300).chars().collect();
        let n = string_to_number(&a, &s).unwrap();
        assert_eq!(number_to_string(&a, &n, 300).unwrap(), s);
    }
}
