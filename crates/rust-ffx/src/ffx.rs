use crate::aes;
use crate::alphabet::Alphabet;
use crate::{Error, Result};

pub enum Direction {
    Encrypt,
    Decrypt,
}

#[derive(Debug)]
struct Bounds {
    min: usize,
    // max == 0 means unbounded above (tweak lengths only)
    max: usize,
}

/// Parameters shared by the FFX family: the keyed AES-CBC PRF, the default
/// tweak with its permitted length range, the text length range implied by
/// the radix, and the alphabet itself.
pub struct Ffx {
    cipher: aes::Cipher,
    default_tweak: Vec<u8>,
    tweak_len: Bounds,
    text_len: Bounds,
    alphabet: Alphabet,
}

impl std::fmt::Debug for Ffx {
    /// Key material and the default tweak never appear in `Debug` output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ffx")
            .field("tweak_len", &self.tweak_len)
            .field("text_len", &self.text_len)
            .field("alphabet", &self.alphabet)
            .finish_non_exhaustive()
    }
}

impl Ffx {
    pub fn new(
        key: &[u8],
        default_tweak: Option<&[u8]>,
        max_text: usize,
        tweak_min: usize,
        tweak_max: usize,
        alphabet: &str,
    ) -> Result<Self> {
        let alphabet = Alphabet::new(alphabet)?;
        let radix = alphabet.radix();

        // the message space must hold at least 100 values:
        // radix^minlen >= 100, i.e. minlen = ceil(2 / log10(radix)),
        // never fewer than two symbols
        let min_text =
            ((2f64 / (radix as f64).log10()).ceil() as usize).max(2);
        if min_text > max_text {
            return Err(Error::TextLength {
                len: max_text,
                min: min_text,
                max: max_text,
            });
        }

        if tweak_max > 0 && tweak_min > tweak_max {
            return Err(Error::TweakLength {
                len: tweak_min,
                min: tweak_min,
                max: tweak_max,
            });
        }

        let tweak_len = Bounds {
            min: tweak_min,
            max: tweak_max,
        };

        let default_tweak = match default_tweak {
            None => Vec::new(),
            Some(t) => {
                check_tweak(&tweak_len, t.len())?;
                t.to_vec()
            }
        };

        Ok(Ffx {
            cipher: aes::Cipher::new(key)?,
            default_tweak,
            tweak_len,
            text_len: Bounds {
                min: min_text,
                max: max_text,
            },
            alphabet,
        })
    }

    /// The per-call tweak when given, the default otherwise.
    pub fn tweak<'a>(&'a self, per_call: Option<&'a [u8]>) -> &'a [u8] {
        per_call.unwrap_or(&self.default_tweak)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn radix(&self) -> usize {
        self.alphabet.radix()
    }

    pub fn check_text_length(&self, n: usize) -> Result<()> {
        if n < self.text_len.min || n > self.text_len.max {
            return Err(Error::TextLength {
                len: n,
                min: self.text_len.min,
                max: self.text_len.max,
            });
        }
        Ok(())
    }

    pub fn check_tweak_length(&self, n: usize) -> Result<()> {
        check_tweak(&self.tweak_len, n)
    }

    /// CBC-MAC of `src` (a whole number of blocks) into `dst`.
    ///
    /// The encryptor is cloned per call so chaining state never leaks
    /// between invocations or between threads sharing this context.
    pub fn prf(&self, src: &[u8], dst: &mut [u8]) {
        let mut cipher = self.cipher.clone();
        for block in src.chunks_exact(aes::BLOCK_SIZE) {
            cipher.encrypt_block(block, dst);
        }
    }

    /// Plain AES of a single block, used for the counter expansion.
    pub fn ciph(&self, src: &[u8], dst: &mut [u8]) {
        self.prf(&src[..aes::BLOCK_SIZE], dst)
    }
}

fn check_tweak(bounds: &Bounds, n: usize) -> Result<()> {
    if n < bounds.min || (bounds.max > 0 && n > bounds.max) {
        return Err(Error::TweakLength {
            len: n,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(())
}
