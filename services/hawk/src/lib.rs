//! Signer for the hawk MAC scheme.
//!
//! Each request gets an `Authorization: Hawk ...` header whose mac binds the
//! method, target, time, a fresh nonce and optionally the payload to a
//! shared secret.
//!
//! ```no_run
//! use http::Method;
//! use reqauth_core::{Context, RequestView, Result, SignRequest};
//! use reqauth_hawk::RequestSigner;
//!
//! # async fn example() -> Result<()> {
//! let signer = RequestSigner::new("dh37fgj492je", "werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn", "sha256")?;
//!
//! let mut req = RequestView::new(Method::GET, "http://example.com:8000/resource/1?b=1&a=2")?;
//! signer.sign_request(&Context::new(), &mut req).await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{
    REQAUTH_HAWK_ALGORITHM, REQAUTH_HAWK_EXT, REQAUTH_HAWK_KEY_ID, REQAUTH_HAWK_SHARED_SECRET,
    REQAUTH_HAWK_VERIFY_PAYLOAD,
};

mod algorithm;
pub use algorithm::Algorithm;

mod payload;
pub use payload::payload_hash;

mod artifacts;
pub use artifacts::Artifacts;

mod config;
pub use config::Config;

mod sign_request;
pub use sign_request::RequestSigner;
