#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use reqauth_core::*;

mod client;
pub use client::Client;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_context, with_client};

#[cfg(feature = "api-key")]
pub mod api_key {
    pub use reqauth_api_key::*;
}

#[cfg(feature = "basic")]
pub mod basic {
    pub use reqauth_basic::*;
}

#[cfg(feature = "hawk")]
pub mod hawk {
    pub use reqauth_hawk::*;
}
