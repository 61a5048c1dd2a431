//! Signer for the static api key scheme.
//!
//! Every request gets an `X-Api-Key` header. When an access token source is
//! configured and yields a token, an `Authorization: Bearer` header is added
//! as well.

mod constants;
pub use constants::{REQAUTH_API_KEY, X_API_KEY};

mod config;
pub use config::Config;

mod sign_request;
pub use sign_request::RequestSigner;
