use std::fmt;
use std::str::FromStr;

use reqauth_core::hash::{
    base64_hmac_sha1, base64_hmac_sha256, base64_hmac_sha384, base64_hmac_sha512,
};
use reqauth_core::{Error, Result};

/// HMAC digest used to compute the mac.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// HMAC-SHA-1
    Sha1,
    /// HMAC-SHA-256
    Sha256,
    /// HMAC-SHA-384
    Sha384,
    /// HMAC-SHA-512
    Sha512,
}

impl Algorithm {
    /// Base64 encoded HMAC of `content` keyed by `key`.
    pub fn mac(self, key: &[u8], content: &[u8]) -> Result<String> {
        match self {
            Algorithm::Sha1 => base64_hmac_sha1(key, content),
            Algorithm::Sha256 => base64_hmac_sha256(key, content),
            Algorithm::Sha384 => base64_hmac_sha384(key, content),
            Algorithm::Sha512 => base64_hmac_sha512(key, content),
        }
    }
}

/// Accepts `sha256`, `SHA-256`, `HmacSHA256` and the like.
impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let normalized = normalized.strip_prefix("hmac").unwrap_or(&normalized);

        match normalized {
            "sha1" => Ok(Algorithm::Sha1),
            "sha256" => Ok(Algorithm::Sha256),
            "sha384" => Ok(Algorithm::Sha384),
            "sha512" => Ok(Algorithm::Sha512),
            _ => Err(Error::config_invalid(format!(
                "unsupported algorithm: {s:?}"
            ))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Sha1 => write!(f, "sha1"),
            Algorithm::Sha256 => write!(f, "sha256"),
            Algorithm::Sha384 => write!(f, "sha384"),
            Algorithm::Sha512 => write!(f, "sha512"),
        }
    }
}
