use std::fmt::{Debug, Formatter};

use crate::constants::*;
use reqauth_core::{utils::Redact, Context};

/// Config carries all the configuration for HTTP Basic authentication.
#[derive(Clone, Default)]
pub struct Config {
    /// `username` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`REQAUTH_BASIC_USERNAME`]
    pub username: Option<String>,
    /// `password` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`REQAUTH_BASIC_PASSWORD`]
    pub password: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(REQAUTH_BASIC_USERNAME) {
            self.username.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(REQAUTH_BASIC_PASSWORD) {
            self.password.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &Redact::from(&self.password))
            .finish()
    }
}
