use std::fmt::{Debug, Formatter};

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderValue;
use reqauth_core::hash::base64_encode;
use reqauth_core::utils::{is_blank, Redact};
use reqauth_core::{Context, Error, RequestView, Result, SignRequest};

use crate::Config;

/// RequestSigner that implements HTTP Basic authentication.
///
/// - [RFC 7617](https://www.rfc-editor.org/rfc/rfc7617)
#[derive(Clone)]
pub struct RequestSigner {
    username: String,
    password: String,
}

impl RequestSigner {
    /// Create a new signer, failing if `username` or `password` is blank.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        if is_blank(&username) {
            return Err(Error::config_invalid("username must not be blank"));
        }
        if is_blank(&password) {
            return Err(Error::config_invalid("password must not be blank"));
        }

        Ok(Self { username, password })
    }

    /// Create a new signer from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.username.clone().unwrap_or_default(),
            config.password.clone().unwrap_or_default(),
        )
    }

    /// The `Authorization` header value: `Basic base64(username:password)`.
    pub fn authorization(&self) -> String {
        let credential = format!("{}:{}", self.username, self.password);
        format!("Basic {}", base64_encode(credential.as_bytes()))
    }
}

impl Debug for RequestSigner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicRequestSigner")
            .field("username", &self.username)
            .field("password", &Redact::from(&self.password))
            .finish()
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    async fn sign_request(&self, _: &Context, req: &mut RequestView) -> Result<()> {
        let mut value = HeaderValue::from_str(&self.authorization())?;
        value.set_sensitive(true);
        req.header_append(AUTHORIZATION, value);

        Ok(())
    }
}
