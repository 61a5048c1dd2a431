use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::{HeaderName, HeaderValue};
use log::debug;
use reqauth_core::token::fetch_access_token;
use reqauth_core::utils::{is_blank, Redact};
use reqauth_core::{Context, Error, ProvideAccessToken, RequestView, Result, SignRequest};

use crate::constants::X_API_KEY;
use crate::Config;

/// RequestSigner that sends a static api key, plus an optional bearer token.
///
/// - `X-Api-Key: <key>` is always added.
/// - `Authorization: Bearer <token>` is added when the access token source
///   yields a non-blank token.
#[derive(Clone)]
pub struct RequestSigner {
    api_key: HeaderValue,
    token_source: Option<Arc<dyn ProvideAccessToken>>,
}

impl RequestSigner {
    /// Create a new signer, failing if `api_key` is blank or not a valid
    /// header value.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if is_blank(&api_key) {
            return Err(Error::config_invalid("api_key must not be blank"));
        }
        let mut api_key = HeaderValue::from_str(&api_key).map_err(|e| {
            Error::config_invalid("api_key is not a valid header value").with_source(e)
        })?;
        api_key.set_sensitive(true);

        Ok(Self {
            api_key,
            token_source: None,
        })
    }

    /// Create a new signer from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_key.clone().unwrap_or_default())
    }

    /// Attach a source of delegated access tokens.
    pub fn with_access_token_source(mut self, source: impl ProvideAccessToken) -> Self {
        self.token_source = Some(Arc::new(source));
        self
    }
}

impl Debug for RequestSigner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyRequestSigner")
            .field(
                "api_key",
                &Redact::from(self.api_key.to_str().unwrap_or_default()),
            )
            .field("token_source", &self.token_source)
            .finish()
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    async fn sign_request(&self, ctx: &Context, req: &mut RequestView) -> Result<()> {
        let token = fetch_access_token(ctx, self.token_source.as_deref()).await?;
        let bearer = match token {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                    Error::token_source_failed("access token is not a valid header value")
                        .with_source(e)
                })?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        req.header_append(HeaderName::from_static(X_API_KEY), self.api_key.clone());
        if let Some(value) = bearer {
            debug!("adding bearer token for {}", req.uri());
            req.header_append(AUTHORIZATION, value);
        }

        Ok(())
    }
}
