use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderValue;
use log::debug;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use reqauth_core::time::{now, DateTime};
use reqauth_core::token::fetch_access_token;
use reqauth_core::utils::{is_blank, Redact};
use reqauth_core::{Context, Error, ProvideAccessToken, RequestView, Result, SignRequest};

use crate::constants::NONCE_LENGTH;
use crate::{payload_hash, Algorithm, Artifacts, Config};

/// RequestSigner that implements the hawk MAC scheme.
///
/// The mac covers timestamp, nonce, method, resource, host, port, the
/// optional payload hash and ext data. When an access token source yields a
/// token, the token is sent as `id` and the static key id is bound to the
/// mac as `app`.
#[derive(Clone)]
pub struct RequestSigner {
    key_id: String,
    shared_secret: String,
    algorithm: Algorithm,
    verify_payload: bool,
    ext: Option<String>,
    token_source: Option<Arc<dyn ProvideAccessToken>>,

    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new signer.
    ///
    /// Fails if `key_id` or `shared_secret` is blank, or `algorithm` is not
    /// one of the supported HMAC digests.
    pub fn new(
        key_id: impl Into<String>,
        shared_secret: impl Into<String>,
        algorithm: &str,
    ) -> Result<Self> {
        let key_id = key_id.into();
        let shared_secret = shared_secret.into();
        if is_blank(&key_id) {
            return Err(Error::config_invalid("key_id must not be blank"));
        }
        if !is_attribute_safe(&key_id) {
            return Err(Error::config_invalid(format!(
                "key_id contains characters not allowed in a header attribute: {key_id:?}"
            )));
        }
        if is_blank(&shared_secret) {
            return Err(Error::config_invalid("shared_secret must not be blank"));
        }

        Ok(Self {
            key_id,
            shared_secret,
            algorithm: algorithm.parse()?,
            verify_payload: true,
            ext: None,
            token_source: None,

            time: None,
            nonce: None,
        })
    }

    /// Create a new signer from config.
    ///
    /// The algorithm defaults to `sha256` when unset.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut signer = Self::new(
            config.key_id.clone().unwrap_or_default(),
            config.shared_secret.clone().unwrap_or_default(),
            config.algorithm.as_deref().unwrap_or("sha256"),
        )?;
        if let Some(v) = config.verify_payload {
            signer = signer.with_verify_payload(v);
        }
        if let Some(ext) = &config.ext {
            signer = signer.with_ext(ext.clone())?;
        }

        Ok(signer)
    }

    /// Attach a source of delegated access tokens.
    pub fn with_access_token_source(mut self, source: impl ProvideAccessToken) -> Self {
        self.token_source = Some(Arc::new(source));
        self
    }

    /// Enable or disable the payload hash. Enabled by default.
    pub fn with_verify_payload(mut self, verify_payload: bool) -> Self {
        self.verify_payload = verify_payload;
        self
    }

    /// Send application specific data covered by the mac.
    ///
    /// `ext` is placed inside a quoted header attribute, so `"`, `\` and
    /// control characters are rejected.
    pub fn with_ext(mut self, ext: impl Into<String>) -> Result<Self> {
        let ext = ext.into();
        if !is_attribute_safe(&ext) {
            return Err(Error::config_invalid(format!(
                "ext contains characters not allowed in a header attribute: {ext:?}"
            )));
        }

        self.ext = Some(ext);
        Ok(self)
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// Nonces must never repeat for one credential.
    /// Only use this function for testing.
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Build the artifacts a request would be signed with.
    ///
    /// `app` is filled with the key id when `has_token` is set.
    pub fn artifacts(&self, req: &RequestView, has_token: bool) -> Result<Artifacts> {
        let hash = if self.verify_payload && req.has_body() {
            Some(payload_hash(req.content_type()?, req.body()))
        } else {
            None
        };

        Ok(Artifacts {
            ts: self.time.unwrap_or_else(now).timestamp(),
            nonce: self.nonce.clone().unwrap_or_else(generate_nonce),
            method: req.method().as_str().to_string(),
            resource: req.path_and_query(),
            host: req.host().to_string(),
            port: req.port()?,
            hash,
            ext: self.ext.clone(),
            app: has_token.then(|| self.key_id.clone()),
        })
    }
}

/// Whether `v` can be placed between the quotes of a header attribute.
fn is_attribute_safe(v: &str) -> bool {
    !v.chars().any(|c| c == '"' || c == '\\' || c.is_control())
}

fn generate_nonce() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

impl Debug for RequestSigner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HawkRequestSigner")
            .field("key_id", &self.key_id)
            .field("shared_secret", &Redact::from(&self.shared_secret))
            .field("algorithm", &self.algorithm)
            .field("verify_payload", &self.verify_payload)
            .field("ext", &self.ext)
            .field("token_source", &self.token_source)
            .finish()
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    async fn sign_request(&self, ctx: &Context, req: &mut RequestView) -> Result<()> {
        let token = fetch_access_token(ctx, self.token_source.as_deref()).await?;
        if let Some(token) = &token {
            if !is_attribute_safe(token) {
                return Err(Error::token_source_failed(
                    "access token contains characters not allowed in a header attribute",
                ));
            }
        }

        let artifacts = self.artifacts(req, token.is_some())?;
        let canonical = artifacts.canonical_string()?;
        debug!("calculated hawk canonical string: {canonical:?}");

        let mac = self
            .algorithm
            .mac(self.shared_secret.as_bytes(), canonical.as_bytes())?;
        let id = token.as_deref().unwrap_or(&self.key_id);

        let mut value = HeaderValue::from_str(&artifacts.header_value(id, &mac)?)?;
        value.set_sensitive(true);
        req.header_insert(AUTHORIZATION, value);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;
    use http::Method;
    use pretty_assertions::assert_eq;
    use reqauth_core::time::from_unix_seconds;
    use reqauth_core::ErrorKind;

    const KEY_ID: &str = "dh37fgj492je";
    const SECRET: &str = "werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn";

    fn signer() -> RequestSigner {
        RequestSigner::new(KEY_ID, SECRET, "sha256")
            .unwrap()
            .with_time(from_unix_seconds(1_000_000_000).unwrap())
            .with_nonce("abc123")
    }

    #[test]
    fn test_artifacts_for_get() -> Result<()> {
        let req = RequestView::new(Method::GET, "http://example.com/foo?bar=1")?;
        let a = signer().artifacts(&req, false)?;

        assert_eq!(a.ts, 1_000_000_000);
        assert_eq!(a.nonce, "abc123");
        assert_eq!(a.method, "GET");
        assert_eq!(a.resource, "/foo?bar=1");
        assert_eq!(a.port, 80);
        assert_eq!(a.hash, None);
        assert_eq!(a.app, None);
        Ok(())
    }

    #[test]
    fn test_artifacts_hash_follows_verify_payload() -> Result<()> {
        let req = RequestView::new(Method::POST, "https://example.com/foo")?
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_body("{}");

        let a = signer().artifacts(&req, true)?;
        assert_eq!(
            a.hash.as_deref(),
            Some("vNZvU+y3rJKqH4hu1yxrNuaijNPgIJ2Rgj/sHzsQhXY=")
        );
        assert_eq!(a.port, 443);
        assert_eq!(a.app.as_deref(), Some(KEY_ID));

        let a = signer().with_verify_payload(false).artifacts(&req, false)?;
        assert_eq!(a.hash, None);
        Ok(())
    }

    #[test]
    fn test_generate_nonce() {
        let nonce = generate_nonce();
        assert_eq!(nonce.len(), NONCE_LENGTH);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_invalid_ext_is_rejected() {
        for ext in ["a\"b", "a\\b", "a\nb", "a\tb"] {
            let err = signer().with_ext(ext).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }
    }

    #[test]
    fn test_invalid_key_id_is_rejected() {
        for key_id in ["abc\", mac=\"forged", "abc\\", "abc\r\n", "abc\u{0}"] {
            let err = RequestSigner::new(key_id, SECRET, "sha256").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }
    }

    #[test]
    fn test_is_attribute_safe() {
        assert!(is_attribute_safe("dh37fgj492je"));
        assert!(is_attribute_safe("some app, data=1"));
        assert!(!is_attribute_safe("a\"b"));
        assert!(!is_attribute_safe("a\\b"));
        assert!(!is_attribute_safe("a\x7fb"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let s = format!("{:?}", signer());
        assert!(!s.contains(SECRET));
        assert!(s.contains(KEY_ID));
    }
}
