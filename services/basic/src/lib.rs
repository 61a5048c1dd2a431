//! Signer for HTTP Basic authentication.

mod constants;
pub use constants::{REQAUTH_BASIC_PASSWORD, REQAUTH_BASIC_USERNAME};

mod config;
pub use config::Config;

mod sign_request;
pub use sign_request::RequestSigner;
