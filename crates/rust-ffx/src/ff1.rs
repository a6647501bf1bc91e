//! The FF1 algorithm of NIST SP 800-38G.
//!
//! A ten-round tweakable Feistel network over the digits of a caller
//! supplied alphabet, with AES-CBC-MAC as the round function. The context
//! holds the expanded key, the default tweak, and the derived length
//! limits; once built it is immutable and can encrypt and decrypt any
//! number of strings, from any number of threads.

use byteorder::{BigEndian, ByteOrder};
use num_bigint::BigInt;
use num_traits::Euclid;

use crate::aes::BLOCK_SIZE;
use crate::codec;
use crate::ffx::{Direction, Ffx};
use crate::Result;

const ROUNDS: u8 = 10;

/// An FF1 encryption/decryption context.
pub struct FF1 {
    ffx: Ffx,
}

impl FF1 {
    /// Create a context.
    ///
    /// The key may be any length AES supports (16, 24, or 32 bytes). The
    /// default tweak is optional; when supplied, its length must satisfy
    /// `tweak_min`/`tweak_max` (a `tweak_max` of 0 leaves the upper bound
    /// open, as the algorithm itself allows essentially unbounded tweaks).
    /// The radix is the number of characters in `alphabet`.
    pub fn new(
        key: &[u8],
        default_tweak: Option<&[u8]>,
        tweak_min: usize,
        tweak_max: usize,
        alphabet: &str,
    ) -> Result<Self> {
        Ok(FF1 {
            ffx: Ffx::new(
                key,
                default_tweak,
                // text length is capped at 2^32 - 1 by the specification
                u32::MAX as usize,
                tweak_min,
                tweak_max,
                alphabet,
            )?,
        })
    }

    // The algorithm operates on individual symbols, which is not what a
    // utf-8 &str indexes, so both directions run over a decoded char slice.
    fn cipher_chars(
        &self,
        input: &[char],
        per_call_tweak: Option<&[u8]>,
        dir: Direction,
    ) -> Result<Vec<char>> {
        let ffx = &self.ffx;
        let alpha = ffx.alphabet();
        let radix = ffx.radix();

        let t = ffx.tweak(per_call_tweak);
        ffx.check_tweak_length(t.len())?;

        let n = input.len();
        ffx.check_text_length(n)?;

        // step 1: split into halves of u and v = n - u symbols
        let u = n / 2;
        let v = n - u;

        // step 2: the halves spend the whole network in numeric form and
        // only become symbol strings again at the end
        let mut na = codec::string_to_number(alpha, &input[..u])?;
        let mut nb = codec::string_to_number(alpha, &input[u..])?;

        // step 3: bytes needed to carry the v-symbol half as a number
        let b =
            ((((radix as f64).log2() * (v as f64)).ceil() as usize) + 7) / 8;
        // step 4: bytes taken from the PRF stream each round
        let d = 4 * ((b + 3) / 4) + 4;

        // p is the fixed parameter block; q, the per-round block, lives
        // directly behind it in the same buffer since the PRF runs over
        // their concatenation. q is the tweak, zero padding to a block
        // boundary, the round number, and the numeric half (step 5 and the
        // static part of step 6i).
        let q_len =
            ((t.len() + 1 + b + (BLOCK_SIZE - 1)) / BLOCK_SIZE) * BLOCK_SIZE;
        let mut p = vec![0u8; BLOCK_SIZE + q_len];

        p[0] = 1;
        p[1] = 2;
        // only the low three bytes of the radix are recorded; the write
        // covers four and index 2 is then fixed up
        BigEndian::write_u32(&mut p[2..6], radix as u32);
        p[2] = 1;
        p[6] = ROUNDS;
        p[7] = u as u8;
        BigEndian::write_u32(&mut p[8..12], n as u32);
        BigEndian::write_u32(&mut p[12..16], t.len() as u32);

        p[BLOCK_SIZE..BLOCK_SIZE + t.len()].copy_from_slice(t);

        // step 6v/6vi precomputation: the two moduli radix^u and radix^v.
        // u is either v or v - 1.
        let mut mu: BigInt = BigInt::from(radix).pow(u as u32);
        let mut mv = mu.clone();
        if u != v {
            mv *= radix;
        }

        // decryption walks the rounds backwards, starting from the state
        // the encryption finished in
        if let Direction::Decrypt = dir {
            std::mem::swap(&mut na, &mut nb);
            std::mem::swap(&mut mu, &mut mv);
        }

        let mut r = vec![0u8; ((d + (BLOCK_SIZE - 1)) / BLOCK_SIZE) * BLOCK_SIZE];

        for i in 0..ROUNDS {
            // per-round part of q: round number, then the numeric half
            // right-aligned in b big-endian bytes (step 6i)
            {
                let q = &mut p[BLOCK_SIZE..];
                let q_len = q.len();

                q[q_len - b - 1] = match dir {
                    Direction::Encrypt => i,
                    Direction::Decrypt => ROUNDS - 1 - i,
                };

                // no left-padded big-endian export in num-bigint, so pad
                // little-endian on the right and reverse
                let (_, mut half) = nb.to_bytes_le();
                half.resize(b, 0);
                half.reverse();
                q[q_len - b..].copy_from_slice(&half);
            }

            // step 6ii
            ffx.prf(&p, &mut r[..BLOCK_SIZE]);

            // step 6iii: extend the MAC to d bytes with counter blocks,
            // R || ciph(R^1) || ciph(R^2) || ... The xor touches only the
            // low word, which is restored afterwards; inputs long enough
            // to need this loop at all are rare.
            for j in 1..r.len() / BLOCK_SIZE {
                let (head, tail) = r.split_at_mut(BLOCK_SIZE);
                let off = (j - 1) * BLOCK_SIZE;

                let w = BigEndian::read_u32(&head[BLOCK_SIZE - 4..]);
                BigEndian::write_u32(&mut head[BLOCK_SIZE - 4..], w ^ j as u32);
                ffx.ciph(head, &mut tail[off..off + BLOCK_SIZE]);
                BigEndian::write_u32(&mut head[BLOCK_SIZE - 4..], w);
            }

            // step 6iv
            let y = BigInt::from_bytes_be(num_bigint::Sign::Plus, &r[..d]);

            // step 6vi: modular combine, direction dependent
            match dir {
                Direction::Encrypt => na += y,
                Direction::Decrypt => na -= y,
            }
            na = na.rem_euclid(&mu);

            // steps 6v, 6viii, 6ix
            std::mem::swap(&mut mu, &mut mv);
            std::mem::swap(&mut na, &mut nb);
        }

        if let Direction::Decrypt = dir {
            std::mem::swap(&mut na, &mut nb);
        }

        // step 7
        let mut out = codec::number_to_string(alpha, &na, u)?;
        out.extend(codec::number_to_string(alpha, &nb, v)?);
        Ok(out)
    }

    fn cipher_string(
        &self,
        input: &str,
        tweak: Option<&[u8]>,
        dir: Direction,
    ) -> Result<String> {
        let chars: Vec<char> = input.chars().collect();
        let out = self.cipher_chars(&chars, tweak, dir)?;
        Ok(out.into_iter().collect())
    }

    /// Encrypt a string of alphabet symbols.
    ///
    /// A tweak given here overrides the context's default tweak.
    pub fn encrypt(&self, pt: &str, tweak: Option<&[u8]>) -> Result<String> {
        self.cipher_string(pt, tweak, Direction::Encrypt)
    }

    /// Decrypt a string of alphabet symbols.
    ///
    /// The tweak must match the one used to encrypt.
    pub fn decrypt(&self, ct: &str, tweak: Option<&[u8]>) -> Result<String> {
        self.cipher_string(ct, tweak, Direction::Decrypt)
    }
}

/// One-shot encryption with a throwaway context.
pub fn encrypt(
    key: &[u8],
    tweak: Option<&[u8]>,
    pt: &str,
    alphabet: &str,
) -> Result<String> {
    FF1::new(key, None, 0, 0, alphabet)?.encrypt(pt, tweak)
}

/// One-shot decryption with a throwaway context.
pub fn decrypt(
    key: &[u8],
    tweak: Option<&[u8]>,
    ct: &str,
    alphabet: &str,
) -> Result<String> {
    FF1::new(key, None, 0, 0, alphabet)?.decrypt(ct, tweak)
}
