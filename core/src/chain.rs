use std::collections::HashSet;
use std::fmt::{self, Debug};
use std::sync::Arc;

use async_trait::async_trait;
use http::HeaderName;

use crate::{Context, Error, RequestView, Result, SignRequest};

/// An ordered list of signers applied to one request before dispatch.
///
/// Every signer runs, in order, on the same request, so later signers observe
/// headers written by earlier ones. The chain stops at the first error, and
/// fails if a signer drops a header or touches the method, uri or body.
#[derive(Clone)]
pub struct SigningChain {
    signers: Vec<Arc<dyn SignRequest>>,
}

impl SigningChain {
    /// Create a new empty signing chain.
    pub fn new() -> Self {
        Self {
            signers: Vec::new(),
        }
    }

    /// Add a signer to the end of the chain.
    pub fn push(mut self, signer: impl SignRequest) -> Self {
        self.signers.push(Arc::new(signer));
        self
    }

    /// Create a signing chain from a vector of signers.
    pub fn from_vec(signers: Vec<Arc<dyn SignRequest>>) -> Self {
        Self { signers }
    }

    /// Number of signers in the chain.
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// Whether the chain has no signers.
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}

impl Default for SigningChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for SigningChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningChain")
            .field("signers", &self.signers)
            .finish()
    }
}

#[async_trait]
impl SignRequest for SigningChain {
    async fn sign_request(&self, ctx: &Context, req: &mut RequestView) -> Result<()> {
        for signer in &self.signers {
            log::debug!("applying signer: {:?}", signer);

            let before: HashSet<HeaderName> = req.headers().keys().cloned().collect();
            let method = req.method().clone();
            let uri = req.uri().clone();
            let body = req.body().clone();
            signer.sign_request(ctx, req).await?;

            // Signers may overwrite headers but never drop one set earlier.
            if let Some(name) = before.iter().find(|k| !req.headers().contains_key(*k)) {
                return Err(Error::request_invalid(format!(
                    "signer {signer:?} removed header {name}"
                )));
            }
            if *req.method() != method || *req.uri() != uri || *req.body() != body {
                return Err(Error::request_invalid(format!(
                    "signer {signer:?} changed the method, uri or body"
                )));
            }
        }

        Ok(())
    }
}
