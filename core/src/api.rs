use crate::{Context, RequestView, Result};
use std::fmt::Debug;
use std::sync::Arc;

/// SignRequest is the trait implemented by every authentication scheme.
///
/// A signer holds immutable credential material and may only touch the
/// request by adding or overwriting headers. One signer instance can be used
/// concurrently on distinct requests.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Authenticate the request in place.
    ///
    /// Any error is fatal for this send attempt: the request must not be
    /// dispatched partially signed, and signers never retry on their own.
    async fn sign_request(&self, ctx: &Context, req: &mut RequestView) -> Result<()>;
}

#[async_trait::async_trait]
impl<T: SignRequest + ?Sized> SignRequest for Arc<T> {
    async fn sign_request(&self, ctx: &Context, req: &mut RequestView) -> Result<()> {
        self.as_ref().sign_request(ctx, req).await
    }
}

/// ProvideAccessToken supplies a delegated bearer token on demand.
///
/// Implementations may block on I/O to fetch or refresh a token and are
/// responsible for their own synchronization. `Ok(None)` and blank tokens
/// both mean "no delegated token, use the static credential".
#[async_trait::async_trait]
pub trait ProvideAccessToken: Debug + Send + Sync + 'static {
    /// Fetch the current access token.
    async fn provide_access_token(&self, ctx: &Context) -> Result<Option<String>>;
}

#[async_trait::async_trait]
impl<T: ProvideAccessToken + ?Sized> ProvideAccessToken for Arc<T> {
    async fn provide_access_token(&self, ctx: &Context) -> Result<Option<String>> {
        self.as_ref().provide_access_token(ctx).await
    }
}
