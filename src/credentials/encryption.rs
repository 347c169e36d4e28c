//! AES-256-GCM sealing of tokens before they reach disk.
//!
//! Every token gets its own random 96-bit nonce. Ciphertext and nonce are
//! stored base64-encoded side by side.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

const KEY_SIZE: usize = 32;
const NONCE_SIZE: usize = 12;

/// Holds the master key and seals/opens individual tokens.
pub struct TokenCipher {
    cipher: Aes256Gcm,
}

impl TokenCipher {
    /// Builds a cipher from a base64-encoded 32-byte master key.
    pub fn from_base64_key(key_base64: &str) -> Result<Self> {
        let key_bytes = BASE64
            .decode(key_base64)
            .context("Failed to decode base64 encryption key")?;

        if key_bytes.len() != KEY_SIZE {
            return Err(anyhow!(
                "Encryption key must be {} bytes (256 bits), got {} bytes",
                KEY_SIZE,
                key_bytes.len()
            ));
        }

        let cipher = Aes256Gcm::new_from_slice(&key_bytes)
            .map_err(|e| anyhow!("Failed to create cipher: {}", e))?;
        Ok(Self { cipher })
    }

    /// Encrypts a token. Returns `(ciphertext, nonce)`, both base64.
    pub fn seal(&self, token: &str) -> Result<(String, String)> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .cipher
            .encrypt(&nonce, token.as_bytes())
            .map_err(|e| anyhow!("Encryption failed: {}", e))?;

        Ok((BASE64.encode(sealed), BASE64.encode(nonce)))
    }

    /// Decrypts a token sealed with [`TokenCipher::seal`] under the same key.
    pub fn open(&self, ciphertext: &str, nonce: &str) -> Result<String> {
        let sealed = BASE64
            .decode(ciphertext)
            .context("Failed to decode ciphertext")?;
        let nonce_bytes = BASE64.decode(nonce).context("Failed to decode nonce")?;

        if nonce_bytes.len() != NONCE_SIZE {
            return Err(anyhow!(
                "Invalid nonce size: expected {}, got {}",
                NONCE_SIZE,
                nonce_bytes.len()
            ));
        }

        let plain = self
            .cipher
            .decrypt(Nonce::from_slice(&nonce_bytes), sealed.as_ref())
            .map_err(|e| anyhow!("Decryption failed (wrong key or corrupted data): {}", e))?;

        String::from_utf8(plain).context("Decrypted token is not valid UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher(byte: u8) -> TokenCipher {
        TokenCipher::from_base64_key(&BASE64.encode([byte; 32])).unwrap()
    }

    #[test]
    fn test_key_validation() {
        assert!(TokenCipher::from_base64_key(&BASE64.encode([0u8; 32])).is_ok());
        assert!(TokenCipher::from_base64_key(&BASE64.encode([0u8; 16])).is_err());
        assert!(TokenCipher::from_base64_key(&BASE64.encode([0u8; 64])).is_err());
        assert!(TokenCipher::from_base64_key("not-valid-base64!@#$").is_err());
    }

    #[test]
    fn test_seal_open() {
        let cipher = cipher(0);
        let (sealed, nonce) = cipher.seal("hubspot-access-token").unwrap();
        assert_ne!(sealed, "hubspot-access-token");
        assert_eq!(cipher.open(&sealed, &nonce).unwrap(), "hubspot-access-token");
    }

    #[test]
    fn test_nonces_are_unique() {
        let cipher = cipher(0);
        let (a, nonce_a) = cipher.seal("same").unwrap();
        let (b, nonce_b) = cipher.seal("same").unwrap();
        assert_ne!(nonce_a, nonce_b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let (sealed, nonce) = cipher(0).seal("secret").unwrap();
        assert!(cipher(1).open(&sealed, &nonce).is_err());
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let cipher = cipher(0);
        let (mut sealed, nonce) = cipher.seal("secret").unwrap();
        sealed.push('X');
        assert!(cipher.open(&sealed, &nonce).is_err());
    }
}
