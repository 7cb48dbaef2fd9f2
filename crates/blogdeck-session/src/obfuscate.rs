//! Reversible obfuscation for remembered passwords.
//!
//! Text is XOR-masked per UTF-16 code unit with a repeating key, then
//! percent-escaped and base64 encoded. This only keeps a password from
//! sitting in storage as plain text; it is not encryption.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::ObfuscateError;

/// Key used by both applications.
pub const DEFAULT_KEY: &str = "myBlogSecretKey";

/// XOR masker with a fixed key.
#[derive(Debug, Clone)]
pub struct Obfuscator {
    key: Vec<u16>,
}

impl Default for Obfuscator {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.encode_utf16().collect(),
        }
    }
}

impl Obfuscator {
    /// Masker with a custom key.
    ///
    /// The key must be non-empty ASCII so masking never produces a lone
    /// surrogate.
    pub fn new(key: &str) -> Result<Self, ObfuscateError> {
        if key.is_empty() || !key.is_ascii() {
            return Err(ObfuscateError::InvalidKey);
        }
        Ok(Self {
            key: key.encode_utf16().collect(),
        })
    }

    /// Obfuscate `plaintext`. Empty input yields an empty token.
    pub fn encode(&self, plaintext: &str) -> String {
        if plaintext.is_empty() {
            return String::new();
        }
        let masked = String::from_utf16_lossy(&self.mask(plaintext.encode_utf16()));
        STANDARD.encode(urlencoding::encode(&masked).as_bytes())
    }

    /// Reverse [`encode`](Self::encode). Empty input yields empty text.
    pub fn decode(&self, token: &str) -> Result<String, ObfuscateError> {
        if token.is_empty() {
            return Ok(String::new());
        }
        let escaped = String::from_utf8(STANDARD.decode(token.trim())?)?;
        let masked = urlencoding::decode(&escaped)?;
        Ok(String::from_utf16(&self.mask(masked.encode_utf16()))?)
    }

    fn mask(&self, units: impl Iterator<Item = u16>) -> Vec<u16> {
        units
            .zip(self.key.iter().cycle())
            .map(|(unit, key)| unit ^ key)
            .collect()
    }
}

/// Obfuscate with [`DEFAULT_KEY`].
pub fn encode(plaintext: &str) -> String {
    Obfuscator::default().encode(plaintext)
}

/// Decode a token produced with [`DEFAULT_KEY`].
pub fn decode(token: &str) -> Result<String, ObfuscateError> {
    Obfuscator::default().decode(token)
}
