//! The per-dataset runtime context.
//!
//! Binds a dataset definition to its unwrapped data keys, with one
//! prepared FF1 instance per key so the per-call path never touches key
//! material or allocates cipher state. The context is immutable after
//! construction and safe to share across threads without locking.

use ffx::alphabet::Alphabet;
use ffx::codec;
use ffx::ff1::FF1;
use tracing::debug;
use zeroize::Zeroizing;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::keynum;
use crate::keys::{self, KeyCache};
use crate::rules::{self, ParsedInput};

pub struct DatasetContext {
    dataset: Dataset,
    input: Alphabet,
    output: Alphabet,
    /// One cipher per cached key, in cache order. With `current_key_only`
    /// the list holds exactly the current key.
    ciphers: Vec<FF1>,
    current_key_number: usize,
    current_key_only: bool,
}

impl std::fmt::Debug for DatasetContext {
    /// Key material never appears in `Debug` output; only the dataset
    /// name and non-sensitive bookkeeping fields are shown.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetContext")
            .field("dataset", &self.dataset.name)
            .field("ciphers", &self.ciphers.len())
            .field("current_key_number", &self.current_key_number)
            .field("current_key_only", &self.current_key_only)
            .finish()
    }
}

impl DatasetContext {
    /// Build a context from a dataset definition and its wrapped key set,
    /// unwrapping every data key with the cache's private key.
    ///
    /// A construction failure leaves nothing behind; the passphrase is
    /// borrowed for the duration of the call only.
    pub fn new(
        dataset: Dataset,
        cache: &KeyCache,
        passphrase: &str,
    ) -> Result<Self> {
        let mut raw: Vec<Zeroizing<Vec<u8>>> =
            Vec::with_capacity(cache.keys.len());
        for wrapped in &cache.keys {
            raw.push(keys::unwrap_data_key(
                &cache.encrypted_private_key,
                passphrase,
                wrapped,
            )?);
        }
        Self::with_raw_keys(
            dataset,
            &raw,
            cache.current_key_number,
            cache.current_key_only,
        )
    }

    /// Build a context from already unwrapped data keys. `raw_keys[i]` is
    /// the key with key number `i`, except under `current_key_only`,
    /// where the single entry is the current key.
    pub fn with_raw_keys(
        dataset: Dataset,
        raw_keys: &[impl AsRef<[u8]>],
        current_key_number: usize,
        current_key_only: bool,
    ) -> Result<Self> {
        if dataset.encryption_algorithm != "FF1" {
            return Err(Error::Unsupported(
                dataset.encryption_algorithm.clone(),
            ));
        }

        let input = Alphabet::new(&dataset.input_character_set)?;
        let output = Alphabet::new(&dataset.output_character_set)?;
        let bits = dataset.msb_encoding_bits;

        // the output domain must cover every input digit plus the shifted
        // key number in the first symbol
        let representable = 1usize.checked_shl(bits).ok_or_else(|| {
            Error::AlphabetTooSmall(format!(
                "{bits} msb encoding bits exceed the symbol domain"
            ))
        })?;
        let needed =
            input.radix().checked_mul(representable).unwrap_or(usize::MAX);
        if output.radix() < needed {
            return Err(Error::AlphabetTooSmall(format!(
                "output radix {} cannot hold radix {} shifted by {} \
                 key-number bits",
                output.radix(),
                input.radix(),
                bits
            )));
        }
        if raw_keys.is_empty() {
            return Err(Error::MalformedInput("no data keys".into()));
        }
        if current_key_only && raw_keys.len() != 1 {
            return Err(Error::MalformedInput(
                "current_key_only cache must hold exactly one key".into(),
            ));
        }
        if current_key_number >= representable
            || (!current_key_only && current_key_number >= raw_keys.len())
        {
            return Err(Error::MalformedInput(format!(
                "current key number {current_key_number} out of range"
            )));
        }
        if raw_keys.len() > representable {
            return Err(Error::AlphabetTooSmall(format!(
                "{} keys cannot be numbered in {} msb encoding bits",
                raw_keys.len(),
                bits
            )));
        }

        let tweak = dataset.tweak_bytes()?;
        let mut ciphers = Vec::with_capacity(raw_keys.len());
        for key in raw_keys {
            ciphers.push(FF1::new(
                key.as_ref(),
                Some(&tweak),
                dataset.tweak_min_len,
                dataset.tweak_max_len,
                &dataset.input_character_set,
            )?);
        }

        debug!(
            dataset = %dataset.name,
            keys = ciphers.len(),
            current = current_key_number,
            "dataset context ready"
        );

        Ok(DatasetContext {
            dataset,
            input,
            output,
            ciphers,
            current_key_number,
            current_key_only,
        })
    }

    pub fn name(&self) -> &str {
        &self.dataset.name
    }

    pub fn current_key_number(&self) -> usize {
        self.current_key_number
    }

    pub fn key_count(&self) -> usize {
        self.ciphers.len()
    }

    fn cipher_for(&self, key_number: usize) -> Result<&FF1> {
        if self.current_key_only {
            if key_number == self.current_key_number {
                Ok(&self.ciphers[0])
            } else {
                Err(Error::KeyUnavailable(key_number))
            }
        } else {
            self.ciphers
                .get(key_number)
                .ok_or(Error::KeyUnavailable(key_number))
        }
    }

    fn encrypt_parsed(
        &self,
        cipher: &FF1,
        key_number: usize,
        parsed: &ParsedInput,
        tweak: Option<&[u8]>,
    ) -> Result<String> {
        let core: String = parsed.core().iter().collect();
        let ct = cipher.encrypt(&core, tweak)?;

        let ct: Vec<char> = ct.chars().collect();
        let mut ct = codec::convert(&self.input, &self.output, &ct)?;
        keynum::embed(
            &self.output,
            &mut ct,
            key_number,
            self.dataset.msb_encoding_bits,
        )?;

        rules::reassemble(parsed, ct)
    }

    /// Encrypt with the current key. Passthrough characters keep their
    /// positions; the result has the length of the plaintext.
    pub fn encrypt(
        &self,
        plaintext: &str,
        tweak: Option<&[u8]>,
    ) -> Result<String> {
        let parsed = rules::parse(
            plaintext,
            &self.dataset.rules,
            &self.dataset.passthrough,
            &self.input,
        )?;
        let cipher = self.cipher_for(self.current_key_number)?;
        self.encrypt_parsed(cipher, self.current_key_number, &parsed, tweak)
    }

    /// Decrypt, selecting the data key named by the first core symbol.
    pub fn decrypt(
        &self,
        ciphertext: &str,
        tweak: Option<&[u8]>,
    ) -> Result<String> {
        let parsed = rules::parse(
            ciphertext,
            &self.dataset.rules,
            &self.dataset.passthrough,
            &self.output,
        )?;

        let mut core = parsed.core().to_vec();
        let key_number = keynum::extract(
            &self.output,
            &mut core,
            self.dataset.msb_encoding_bits,
        )?;
        let cipher = self.cipher_for(key_number)?;

        let core = codec::convert(&self.output, &self.input, &core)?;
        let pt =
            cipher.decrypt(&core.iter().collect::<String>(), tweak)?;

        rules::reassemble(&parsed, pt.chars().collect())
    }

    /// Encrypt under every cached key, in ascending key-number order, so
    /// historical ciphertexts of the same value can be matched by
    /// deterministic search. The element at the current key number equals
    /// [`encrypt`](Self::encrypt).
    pub fn encrypt_for_search(
        &self,
        plaintext: &str,
        tweak: Option<&[u8]>,
    ) -> Result<Vec<String>> {
        if self.current_key_only {
            return Err(Error::SearchRequiresAllKeys);
        }

        let parsed = rules::parse(
            plaintext,
            &self.dataset.rules,
            &self.dataset.passthrough,
            &self.input,
        )?;

        let mut out = Vec::with_capacity(self.ciphers.len());
        for (key_number, cipher) in self.ciphers.iter().enumerate() {
            out.push(
                self.encrypt_parsed(cipher, key_number, &parsed, tweak)?,
            );
        }
        Ok(out)
    }

    /// Encrypt a batch of values with one rule/key setup.
    pub fn encrypt_batch<S: AsRef<str>>(
        &self,
        plaintexts: &[S],
        tweak: Option<&[u8]>,
    ) -> Result<Vec<String>> {
        plaintexts
            .iter()
            .map(|pt| self.encrypt(pt.as_ref(), tweak))
            .collect()
    }

    /// Decrypt a batch of values.
    pub fn decrypt_batch<S: AsRef<str>>(
        &self,
        ciphertexts: &[S],
        tweak: Option<&[u8]>,
    ) -> Result<Vec<String>> {
        ciphertexts
            .iter()
            .map(|ct| self.decrypt(ct.as_ref(), tweak))
            .collect()
    }
}
