//! Format-preserving encryption primitives.
//!
//! Implements the NIST SP 800-38G FF1 algorithm over an arbitrary,
//! caller-supplied alphabet. Format-preserving, in short, means the
//! ciphertext has the same length as the plaintext and is drawn from the
//! same set of symbols.
//!
//! The alphabet is an ordered sequence of distinct characters; a symbol's
//! position in the sequence is its digit value, so `"0123456789"` gives the
//! usual decimal digits. The [`codec`] module converts between symbol
//! strings and arbitrary-precision integers, in either direction and across
//! alphabets of different radix.
//!
//! # Example
//! ```rust
//! let ff1 = ffx::ff1::FF1::new(
//!     &[
//!         0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6,
//!         0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
//!     ],     // the AES key
//!     None,  // no default tweak
//!     0, 0,  // tweak length unbounded
//!     "0123456789",
//! ).unwrap();
//!
//! // first NIST sample vector for FF1/AES-128
//! let ct = ff1.encrypt("0123456789", None).unwrap();
//! assert_eq!(ct, "2433477484");
//! assert_eq!(ff1.decrypt(&ct, None).unwrap(), "0123456789");
//! ```

pub(crate) mod aes;
pub mod alphabet;
pub mod codec;
pub mod ff1;
pub(crate) mod ffx;

/// Errors returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("radix must be at least 2, got {0}")]
    Radix(usize),
    #[error("alphabet contains duplicate character {0:?}")]
    DuplicateCharacter(char),
    #[error("character {0:?} is not in the alphabet")]
    InvalidCharacter(char),
    #[error("no symbol at position {0} in a radix-{1} alphabet")]
    DigitRange(usize, usize),
    #[error("value does not fit in {0} symbols")]
    Overflow(usize),
    #[error("text length {len} outside the supported range {min}..={max}")]
    TextLength { len: usize, min: usize, max: usize },
    #[error("tweak length {len} outside the permitted range {min}..={max}")]
    TweakLength { len: usize, min: usize, max: usize },
    #[error("AES key must be 16, 24, or 32 bytes, got {0}")]
    KeyLength(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
