//! The unstructured byte-stream envelope.
//!
//! A ciphertext is a 6-byte fixed header (`version | flags | algorithm |
//! iv_len | key_len:u16be`), the IV, the wrapped data key, and then the
//! AES-GCM payload with its 16-byte tag appended. When the AAD flag is
//! set, the whole header including IV and wrapped key is bound as
//! additional authenticated data and the tag covers it.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, OsRng, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm, KeyInit, Nonce};
use base64::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::keys::{self, KeyResponse};

const VERSION: u8 = 0;
const FLAG_AAD: u8 = 0x01;
const FIXED_LEN: usize = 6;

/// AEAD algorithms of the envelope, by wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Aes256Gcm,
    Aes128Gcm,
}

impl Algorithm {
    pub fn id(self) -> u8 {
        match self {
            Algorithm::Aes256Gcm => 0,
            Algorithm::Aes128Gcm => 1,
        }
    }

    fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(Algorithm::Aes256Gcm),
            1 => Ok(Algorithm::Aes128Gcm),
            _ => Err(Error::MalformedInput(format!(
                "unknown envelope algorithm id {id}"
            ))),
        }
    }

    fn for_key_len(len: usize) -> Result<Self> {
        match len {
            32 => Ok(Algorithm::Aes256Gcm),
            16 => Ok(Algorithm::Aes128Gcm),
            n => Err(Error::MalformedInput(format!(
                "no envelope algorithm for a {n}-byte data key"
            ))),
        }
    }

    pub fn key_len(self) -> usize {
        match self {
            Algorithm::Aes256Gcm => 32,
            Algorithm::Aes128Gcm => 16,
        }
    }

    pub fn iv_len(self) -> usize {
        12
    }

    pub fn tag_len(self) -> usize {
        16
    }
}

/// The parsed envelope header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub flags: u8,
    pub algorithm: Algorithm,
    pub iv: Vec<u8>,
    pub wrapped_key: Vec<u8>,
}

impl Header {
    pub fn encode(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(FIXED_LEN + self.iv.len() + self.wrapped_key.len());
        out.push(VERSION);
        out.push(self.flags);
        out.push(self.algorithm.id());
        out.push(self.iv.len() as u8);
        out.extend_from_slice(&(self.wrapped_key.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.wrapped_key);
        out
    }

    /// Parse a header off the front of `data`, returning it together with
    /// the number of bytes consumed.
    pub fn parse(data: &[u8]) -> Result<(Header, usize)> {
        if data.len() < FIXED_LEN {
            return Err(Error::MalformedInput("truncated header".into()));
        }

        let version = data[0];
        let flags = data[1];
        if version != VERSION || flags & !FLAG_AAD != 0 {
            return Err(Error::MalformedInput(format!(
                "invalid envelope header (version {version}, flags {flags:#04x})"
            )));
        }

        let algorithm = Algorithm::from_id(data[2])?;
        let iv_len = data[3] as usize;
        let key_len = u16::from_be_bytes([data[4], data[5]]) as usize;

        let total = FIXED_LEN + iv_len + key_len;
        if data.len() < total {
            return Err(Error::MalformedInput("truncated header".into()));
        }

        Ok((
            Header {
                flags,
                algorithm,
                iv: data[FIXED_LEN..FIXED_LEN + iv_len].to_vec(),
                wrapped_key: data[FIXED_LEN + iv_len..total].to_vec(),
            },
            total,
        ))
    }

    fn aad_bound(&self) -> bool {
        self.flags & FLAG_AAD != 0
    }
}

/// Encrypt a byte stream under the response's data key.
///
/// The wrapped data key is embedded in the header, so the resulting
/// ciphertext is self-describing: decryption needs only the private key
/// and its passphrase.
pub fn encrypt(
    material: &KeyResponse,
    passphrase: &str,
    plaintext: &[u8],
) -> Result<Vec<u8>> {
    let raw_key = keys::unwrap_data_key(
        &material.encrypted_private_key,
        passphrase,
        &material.wrapped_data_key,
    )?;
    let algorithm = Algorithm::for_key_len(raw_key.len())?;

    let mut iv = vec![0u8; algorithm.iv_len()];
    OsRng.fill_bytes(&mut iv);

    let header = Header {
        flags: FLAG_AAD,
        algorithm,
        iv,
        wrapped_key: BASE64_STANDARD.decode(&material.wrapped_data_key)?,
    };
    let header_bytes = header.encode();

    debug!(alg = ?algorithm, len = plaintext.len(), "sealing envelope");

    let sealed = seal(
        algorithm,
        &raw_key,
        &header.iv,
        plaintext,
        &header_bytes,
    )?;

    let mut out = header_bytes;
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Decrypt an envelope produced by [`encrypt`].
///
/// Verifies the GCM tag (and, when the AAD flag is set, the header's
/// integrity); a mismatch fails with `AuthFailed`.
pub fn decrypt(
    encrypted_private_key: &str,
    passphrase: &str,
    data: &[u8],
) -> Result<Vec<u8>> {
    let (header, consumed) = Header::parse(data)?;

    let raw_key = keys::unwrap_data_key_bytes(
        encrypted_private_key,
        passphrase,
        &header.wrapped_key,
    )?;
    if raw_key.len() != header.algorithm.key_len() {
        return Err(Error::MalformedInput(format!(
            "unwrapped key is {} bytes, algorithm expects {}",
            raw_key.len(),
            header.algorithm.key_len()
        )));
    }
    if header.iv.len() != header.algorithm.iv_len() {
        return Err(Error::MalformedInput(format!(
            "IV is {} bytes, algorithm expects {}",
            header.iv.len(),
            header.algorithm.iv_len()
        )));
    }

    let payload = &data[consumed..];
    if payload.len() < header.algorithm.tag_len() {
        return Err(Error::MalformedInput("truncated payload".into()));
    }

    let aad: &[u8] = if header.aad_bound() { &data[..consumed] } else { &[] };

    open(header.algorithm, &raw_key, &header.iv, payload, aad)
}

fn seal(
    algorithm: Algorithm,
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let payload = Payload { msg: plaintext, aad };
    let sealed = match algorithm {
        Algorithm::Aes256Gcm => Aes256Gcm::new_from_slice(key)
            .map_err(|e| Error::MalformedInput(e.to_string()))?
            .encrypt(Nonce::from_slice(iv), payload),
        Algorithm::Aes128Gcm => Aes128Gcm::new_from_slice(key)
            .map_err(|e| Error::MalformedInput(e.to_string()))?
            .encrypt(Nonce::from_slice(iv), payload),
    };
    sealed.map_err(|_| Error::MalformedInput("seal failed".into()))
}

fn open(
    algorithm: Algorithm,
    key: &[u8],
    iv: &[u8],
    payload: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>> {
    let payload = Payload { msg: payload, aad };
    let opened = match algorithm {
        Algorithm::Aes256Gcm => Aes256Gcm::new_from_slice(key)
            .map_err(|e| Error::MalformedInput(e.to_string()))?
            .decrypt(Nonce::from_slice(iv), payload),
        Algorithm::Aes128Gcm => Aes128Gcm::new_from_slice(key)
            .map_err(|e| Error::MalformedInput(e.to_string()))?
            .decrypt(Nonce::from_slice(iv), payload),
    };
    opened.map_err(|_| Error::AuthFailed)
}
