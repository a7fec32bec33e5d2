//! Reversible password cipher.
//!
//! Stored passwords are encrypted with one shared secret that ships with the
//! application, so anyone holding the data file and the binary can recover
//! them. This is an obfuscation layer for a demo account store, not a
//! credential system.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, OsRng};
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use pbkdf2::pbkdf2_hmac;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

const KEY_SALT: &[u8] = b"shopfront.password-cipher";
const KEY_ITERATIONS: u32 = 10_000;
const NONCE_LEN: usize = 12;

/// Errors from the password cipher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("password encryption failed")]
    Encrypt,
    #[error("stored password is not a valid envelope")]
    Malformed,
    #[error("stored password could not be decrypted")]
    Decrypt,
}

/// AES-256-GCM over a key derived once from the shared secret.
///
/// Output is base64 of `nonce || ciphertext`, with a fresh nonce per call.
#[derive(Clone)]
pub struct PasswordCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for PasswordCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCipher").finish_non_exhaustive()
    }
}

impl PasswordCipher {
    /// Derive the cipher key from `secret`.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let mut key = [0u8; 32];
        pbkdf2_hmac::<Sha256>(
            secret.expose_secret().as_bytes(),
            KEY_SALT,
            KEY_ITERATIONS,
            &mut key,
        );
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key)),
        }
    }

    /// Encrypt a plaintext password into a storable envelope.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Encrypt` if the AEAD rejects the input.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| CipherError::Encrypt)?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(envelope))
    }

    /// Recover the plaintext from an envelope produced by [`Self::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Malformed` for input that is not an envelope and
    /// `CipherError::Decrypt` when it was sealed under another secret.
    pub fn decrypt(&self, envelope: &str) -> Result<String, CipherError> {
        let bytes = STANDARD
            .decode(envelope)
            .map_err(|_| CipherError::Malformed)?;
        let (nonce, ciphertext) = bytes
            .split_at_checked(NONCE_LEN)
            .ok_or(CipherError::Malformed)?;

        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::Decrypt)?;
        String::from_utf8(plaintext).map_err(|_| CipherError::Malformed)
    }

    /// Whether `envelope` decrypts to exactly `candidate`.
    ///
    /// An envelope that cannot be decrypted matches nothing.
    #[must_use]
    pub fn matches(&self, envelope: &str, candidate: &str) -> bool {
        self.decrypt(envelope)
            .is_ok_and(|plaintext| plaintext == candidate)
    }
}
