use std::fmt::{Debug, Formatter};

use crate::constants::*;
use reqauth_core::{utils::Redact, Context};

/// Config carries all the configuration for the api key scheme.
#[derive(Clone, Default)]
pub struct Config {
    /// `api_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`REQAUTH_API_KEY`]
    pub api_key: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set api_key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(REQAUTH_API_KEY) {
            self.api_key.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &Redact::from(&self.api_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqauth_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_from_env_keeps_explicit_value() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([(REQAUTH_API_KEY.to_string(), "from-env".to_string())]),
        });

        let cfg = Config::new().from_env(&ctx);
        assert_eq!(cfg.api_key.as_deref(), Some("from-env"));

        let cfg = Config::new().with_api_key("explicit").from_env(&ctx);
        assert_eq!(cfg.api_key.as_deref(), Some("explicit"));
    }
}
