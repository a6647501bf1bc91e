use aes::cipher::{BlockEncryptMut, KeyIvInit};
use cbc::Encryptor;

use crate::{Error, Result};

/// AES block size in bytes. FF1 is defined over AES, so this is fixed.
pub const BLOCK_SIZE: usize = 16;

#[derive(Clone)]
enum Inner {
    Aes128(Encryptor<aes::Aes128>),
    Aes192(Encryptor<aes::Aes192>),
    Aes256(Encryptor<aes::Aes256>),
}

/// A CBC-mode AES encryptor with a zero IV, the PRF core of FF1.
///
/// Chaining state lives inside the encryptor, so a fresh clone must be
/// taken for every independent MAC computation.
#[derive(Clone)]
pub struct Cipher {
    inner: Inner,
}

impl std::fmt::Debug for Cipher {
    /// Key material never appears in `Debug` output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher").finish_non_exhaustive()
    }
}

impl Cipher {
    pub fn new(key: &[u8]) -> Result<Cipher> {
        const IV: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

        let inner = match key.len() {
            16 => Inner::Aes128(Encryptor::new(key.into(), (&IV).into())),
            24 => Inner::Aes192(Encryptor::new(key.into(), (&IV).into())),
            32 => Inner::Aes256(Encryptor::new(key.into(), (&IV).into())),
            n => return Err(Error::KeyLength(n)),
        };

        Ok(Cipher { inner })
    }

    pub fn encrypt_block(&mut self, src: &[u8], dst: &mut [u8]) {
        match &mut self.inner {
            Inner::Aes128(e) => e.encrypt_block_b2b_mut(src.into(), dst.into()),
            Inner::Aes192(e) => e.encrypt_block_b2b_mut(src.into(), dst.into()),
            Inner::Aes256(e) => e.encrypt_block_b2b_mut(src.into(), dst.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cipher;
    use crate::Error;

    #[test]
    fn rejects_bad_key_length() {
        assert!(matches!(
            Cipher::new(&[0u8; 15]).unwrap_err(),
            Error::KeyLength(15)
        ));
    }

    #[test]
    fn chaining_state_is_per_clone() {
        let base = Cipher::new(&[0u8; 16]).unwrap();
        let src = [0u8; 16];
        let mut d1 = [0u8; 16];
        let mut d2 = [0u8; 16];

        base.clone().encrypt_block(&src, &mut d1);
        base.clone().encrypt_block(&src, &mut d2);
        assert_eq!(d1, d2);

        // AES-128, all-zero key, all-zero block
        let exp = [
            0x66, 0xe9, 0x4b, 0xd4, 0xef, 0x8a, 0x2c, 0x3b, 0x88, 0x4c, 0xfa,
            0x59, 0xca, 0x34, 0x2b, 0x2e,
        ];
        assert_eq!(d1, exp);
    }
}
