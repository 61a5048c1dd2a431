use std::fmt::{Debug, Formatter};

use log::warn;
use reqauth_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries all the configuration for the hawk scheme.
#[derive(Clone, Default)]
pub struct Config {
    /// `key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`REQAUTH_HAWK_KEY_ID`]
    pub key_id: Option<String>,
    /// `shared_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`REQAUTH_HAWK_SHARED_SECRET`]
    pub shared_secret: Option<String>,
    /// `algorithm` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`REQAUTH_HAWK_ALGORITHM`]
    pub algorithm: Option<String>,
    /// `verify_payload` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`REQAUTH_HAWK_VERIFY_PAYLOAD`]
    ///
    /// Payload verification is enabled when unset.
    pub verify_payload: Option<bool>,
    /// `ext` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`REQAUTH_HAWK_EXT`]
    pub ext: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set key_id
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    /// Set shared_secret
    pub fn with_shared_secret(mut self, shared_secret: impl Into<String>) -> Self {
        self.shared_secret = Some(shared_secret.into());
        self
    }

    /// Set algorithm
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Set verify_payload
    pub fn with_verify_payload(mut self, verify_payload: bool) -> Self {
        self.verify_payload = Some(verify_payload);
        self
    }

    /// Set ext
    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(REQAUTH_HAWK_KEY_ID) {
            self.key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(REQAUTH_HAWK_SHARED_SECRET) {
            self.shared_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(REQAUTH_HAWK_ALGORITHM) {
            self.algorithm.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(REQAUTH_HAWK_VERIFY_PAYLOAD) {
            match parse_bool(&v) {
                Some(b) => {
                    self.verify_payload.get_or_insert(b);
                }
                None => warn!("ignoring invalid {REQAUTH_HAWK_VERIFY_PAYLOAD} value: {v:?}"),
            }
        }
        if let Some(v) = ctx.env_var(REQAUTH_HAWK_EXT) {
            self.ext.get_or_insert(v);
        }

        self
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("key_id", &self.key_id)
            .field("shared_secret", &Redact::from(&self.shared_secret))
            .field("algorithm", &self.algorithm)
            .field("verify_payload", &self.verify_payload)
            .field("ext", &self.ext)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqauth_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_from_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (REQAUTH_HAWK_KEY_ID.to_string(), "dh37fgj492je".to_string()),
                (REQAUTH_HAWK_SHARED_SECRET.to_string(), "secret".to_string()),
                (REQAUTH_HAWK_ALGORITHM.to_string(), "sha256".to_string()),
                (REQAUTH_HAWK_VERIFY_PAYLOAD.to_string(), "False".to_string()),
            ]),
        });

        let cfg = Config::new().with_algorithm("sha1").from_env(&ctx);
        assert_eq!(cfg.key_id.as_deref(), Some("dh37fgj492je"));
        assert_eq!(cfg.shared_secret.as_deref(), Some("secret"));
        assert_eq!(cfg.algorithm.as_deref(), Some("sha1"));
        assert_eq!(cfg.verify_payload, Some(false));
        assert_eq!(cfg.ext, None);
    }

    #[test]
    fn test_invalid_verify_payload_is_ignored() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([(
                REQAUTH_HAWK_VERIFY_PAYLOAD.to_string(),
                "maybe".to_string(),
            )]),
        });

        let cfg = Config::new().from_env(&ctx);
        assert_eq!(cfg.verify_payload, None);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let cfg = Config::new().with_shared_secret("werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn");
        let s = format!("{cfg:?}");
        assert!(!s.contains("werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn"));
    }
}
