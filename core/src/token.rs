//! Access token sources and helpers.

use std::fmt::{Debug, Formatter};

use async_trait::async_trait;
use log::warn;

use crate::time::{from_unix_seconds, now, DateTime};
use crate::utils::{is_blank, Redact};
use crate::{Context, Error, ErrorKind, ProvideAccessToken, Result};

/// Fetch a token from an optional source for a signer.
///
/// - Returns `Ok(None)` if no source is configured or the source has no token.
/// - Blank tokens are treated as absent.
/// - Every failure is reported as [`ErrorKind::TokenSourceFailed`].
pub async fn fetch_access_token(
    ctx: &Context,
    source: Option<&dyn ProvideAccessToken>,
) -> Result<Option<String>> {
    let Some(source) = source else {
        return Ok(None);
    };

    let token = source.provide_access_token(ctx).await.map_err(|err| {
        if err.kind() == ErrorKind::TokenSourceFailed {
            err
        } else {
            Error::token_source_failed(format!("failed to fetch access token from {source:?}"))
                .with_source(err)
        }
    })?;

    match token {
        Some(t) if is_blank(&t) => {
            warn!("access token source {source:?} returned a blank token, ignoring it");
            Ok(None)
        }
        token => Ok(token),
    }
}

/// StaticAccessToken always provides the same token.
#[derive(Clone)]
pub struct StaticAccessToken {
    token: String,
}

impl StaticAccessToken {
    /// Create a new StaticAccessToken.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Debug for StaticAccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAccessToken")
            .field("token", &Redact::from(&self.token))
            .finish()
    }
}

#[async_trait]
impl ProvideAccessToken for StaticAccessToken {
    async fn provide_access_token(&self, _: &Context) -> Result<Option<String>> {
        Ok(Some(self.token.clone()))
    }
}

/// EnvAccessToken reads the token from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvAccessToken {
    key: String,
}

impl EnvAccessToken {
    /// Create a new EnvAccessToken reading from `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[async_trait]
impl ProvideAccessToken for EnvAccessToken {
    async fn provide_access_token(&self, ctx: &Context) -> Result<Option<String>> {
        Ok(ctx.env_var(&self.key))
    }
}

/// OAuthToken is an OAuth 2.0 token with an optional expiry.
///
/// Used as a token source it yields the access token until it expires, then
/// fails. Refreshing is left to the caller.
#[derive(Clone)]
pub struct OAuthToken {
    access_token: String,
    expires_at: Option<DateTime>,
    refresh_token: Option<String>,
}

impl OAuthToken {
    /// Create a token that never expires.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
            refresh_token: None,
        }
    }

    /// Expire the token `expires_in` seconds after `created_at` (Unix seconds).
    pub fn with_expiry(mut self, expires_in: i64, created_at: i64) -> Self {
        self.expires_at = created_at
            .checked_add(expires_in)
            .and_then(from_unix_seconds);
        self
    }

    /// Set the refresh token.
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Refresh token, if any.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Expiry time, `None` if the token never expires.
    pub fn expires_at(&self) -> Option<DateTime> {
        self.expires_at
    }

    /// Check whether the token is expired at `at`.
    pub fn is_expired_at(&self, at: DateTime) -> bool {
        self.expires_at.is_some_and(|exp| at >= exp)
    }

    /// Check whether the token is expired now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now())
    }
}

impl Debug for OAuthToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthToken")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_at", &self.expires_at)
            .field("refresh_token", &Redact::from(&self.refresh_token))
            .finish()
    }
}

#[async_trait]
impl ProvideAccessToken for OAuthToken {
    async fn provide_access_token(&self, _: &Context) -> Result<Option<String>> {
        if self.is_expired() {
            return Err(Error::token_source_failed("access token is expired"));
        }
        Ok(Some(self.access_token.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticEnv;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct FailingSource;

    #[async_trait]
    impl ProvideAccessToken for FailingSource {
        async fn provide_access_token(&self, _: &Context) -> Result<Option<String>> {
            Err(Error::unexpected("token endpoint unreachable"))
        }
    }

    #[tokio::test]
    async fn test_fetch_without_source() -> Result<()> {
        let ctx = Context::new();
        assert_eq!(fetch_access_token(&ctx, None).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_ignores_blank_token() -> Result<()> {
        let ctx = Context::new();
        let source = StaticAccessToken::new("   ");
        assert_eq!(fetch_access_token(&ctx, Some(&source)).await?, None);

        let source = StaticAccessToken::new("token-1");
        assert_eq!(
            fetch_access_token(&ctx, Some(&source)).await?.as_deref(),
            Some("token-1")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_wraps_failures() {
        let ctx = Context::new();
        let err = fetch_access_token(&ctx, Some(&FailingSource))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TokenSourceFailed);
        assert!(err.is_auth_error());
    }

    #[tokio::test]
    async fn test_env_access_token() -> Result<()> {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([("MY_TOKEN".to_string(), "from-env".to_string())]),
        });

        let source = EnvAccessToken::new("MY_TOKEN");
        assert_eq!(
            source.provide_access_token(&ctx).await?.as_deref(),
            Some("from-env")
        );
        let source = EnvAccessToken::new("OTHER_TOKEN");
        assert_eq!(source.provide_access_token(&ctx).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_oauth_token_expiry() -> Result<()> {
        let ctx = Context::new();

        let token = OAuthToken::new("abc").with_refresh_token("refresh");
        assert!(!token.is_expired());
        assert_eq!(token.refresh_token(), Some("refresh"));
        assert_eq!(token.provide_access_token(&ctx).await?.as_deref(), Some("abc"));

        let token = OAuthToken::new("abc").with_expiry(3600, 1_000_000_000);
        let exp = token.expires_at().expect("expiry must be set");
        assert_eq!(exp.timestamp(), 1_000_003_600);
        assert!(!token.is_expired_at(from_unix_seconds(1_000_003_599).unwrap()));
        assert!(token.is_expired_at(exp));
        assert!(token.is_expired());

        let err = token.provide_access_token(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TokenSourceFailed);
        Ok(())
    }
}
