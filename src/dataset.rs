//! The dataset definition: one encryptable field's alphabets, tweak,
//! formatting rules, and key-number encoding width, as delivered by the
//! key service.

use base64::prelude::*;
use serde::Deserialize;

use crate::error::Result;

/// A field-level encryption configuration. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub encryption_algorithm: String,
    /// Characters copied verbatim through encrypt and decrypt.
    #[serde(default)]
    pub passthrough: String,
    pub input_character_set: String,
    pub output_character_set: String,
    /// High bits of the first core symbol reserved for the key number.
    #[serde(default)]
    pub msb_encoding_bits: u32,
    /// Default tweak, base64 on the wire.
    #[serde(default)]
    pub tweak: String,
    #[serde(default)]
    pub tweak_min_len: usize,
    #[serde(default)]
    pub tweak_max_len: usize,
    /// Ordered formatting rules; an implicit passthrough rule with
    /// priority 1 is assumed when none is listed.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Dataset {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub(crate) fn tweak_bytes(&self) -> Result<Vec<u8>> {
        Ok(BASE64_STANDARD.decode(&self.tweak)?)
    }
}

/// A formatting rule. `passthrough` preserves characters in place,
/// `prefix` and `suffix` carry a fixed number of leading or trailing
/// characters around the cipher unencrypted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Rule {
    Passthrough { value: String, priority: i64 },
    Prefix { value: usize, priority: i64 },
    Suffix { value: usize, priority: i64 },
}

impl Rule {
    pub fn priority(&self) -> i64 {
        match self {
            Rule::Passthrough { priority, .. }
            | Rule::Prefix { priority, .. }
            | Rule::Suffix { priority, .. } => *priority,
        }
    }
}
