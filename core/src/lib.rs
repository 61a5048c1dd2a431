//! Core components for authenticating API requests.
//!
//! This crate provides the foundational types and traits for the reqauth ecosystem.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **RequestView**: The finalized request that signers read from and add headers to
//! - **Traits**: Abstract interfaces for signing (`SignRequest`) and delegated tokens (`ProvideAccessToken`)
//! - **SigningChain**: An ordered list of signers applied to one request
//! - **Context**: A container that holds implementations for HTTP sending and environment access
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use http::header::HeaderName;
//! use http::{HeaderValue, Method};
//! use reqauth_core::{Context, RequestBuilder, RequestView, Result, SignRequest, SigningChain};
//!
//! // Implement a signer
//! #[derive(Debug)]
//! struct TenantSigner;
//!
//! #[async_trait]
//! impl SignRequest for TenantSigner {
//!     async fn sign_request(&self, _ctx: &Context, req: &mut RequestView) -> Result<()> {
//!         req.header_insert(
//!             HeaderName::from_static("x-tenant"),
//!             HeaderValue::from_static("acme"),
//!         );
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new();
//! let chain = SigningChain::new().push(TenantSigner);
//!
//! let mut req = RequestBuilder::new(Method::GET, "https://example.com/users/{id}")
//!     .path("id", 42)
//!     .build()?;
//! chain.sign_request(&ctx, &mut req).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! The crate also provides utility modules:
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`token`]: Access token sources
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod token;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};
mod api;
pub use api::{ProvideAccessToken, SignRequest};
mod request;
pub use request::{RequestView, DEFAULT_CONTENT_TYPE};
mod builder;
pub use builder::{CollectionFormat, RequestBuilder, PATH_VARIABLE_ENCODE_SET};
mod chain;
pub use chain::SigningChain;
