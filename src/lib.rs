//! Dataset-driven format-preserving encryption.
//!
//! A *dataset* describes one encryptable field: the alphabet its values
//! are drawn from, the alphabet its ciphertexts may use, characters that
//! pass through untouched, formatting rules for fixed prefixes and
//! suffixes, a default tweak, and a numbered set of data keys for
//! rotation. A [`DatasetContext`] binds a dataset to its unwrapped keys
//! and encrypts and decrypts values whose shape is indistinguishable from
//! the plaintext: same length, same character classes, punctuation in
//! place.
//!
//! The cipher underneath is NIST SP 800-38G FF1, provided by the [`ffx`]
//! engine crate. The key number that produced a ciphertext is folded into
//! the high bits of the first encrypted symbol, which is what lets a
//! single context decrypt values written under rotated-out keys and emit
//! one ciphertext per historical key for deterministic search
//! ([`DatasetContext::encrypt_for_search`]).
//!
//! ```
//! use datafpe::{Dataset, DatasetContext};
//!
//! let dataset = Dataset::from_json(r#"{
//!     "name": "ssn",
//!     "encryption_algorithm": "FF1",
//!     "passthrough": "-",
//!     "input_character_set": "0123456789",
//!     "output_character_set": "0123456789",
//!     "tweak": ""
//! }"#).unwrap();
//!
//! let ctx = DatasetContext::with_raw_keys(dataset, &[[7u8; 16]], 0, false)
//!     .unwrap();
//! let ct = ctx.encrypt("123-45-6789", None).unwrap();
//! assert_eq!(ct.len(), 11);
//! assert_eq!(&ct[3..4], "-");
//! assert_eq!(ctx.decrypt(&ct, None).unwrap(), "123-45-6789");
//! ```
//!
//! The [`envelope`] module carries the companion format for unstructured
//! byte streams: a self-describing header plus AES-GCM, sharing the same
//! RSA key-unwrap step ([`keys::unwrap_data_key`]) as the structured
//! path.

pub mod context;
pub mod dataset;
pub mod envelope;
mod error;
mod keynum;
pub mod keys;
mod rules;

pub use context::DatasetContext;
pub use dataset::{Dataset, Rule};
pub use error::{Error, Result};
pub use keys::{unwrap_data_key, KeyCache, KeyResponse};
