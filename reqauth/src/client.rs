use bytes::Bytes;
use http::Method;
use log::debug;
use reqauth_core::{Context, RequestBuilder, RequestView, Result, SignRequest, SigningChain};

/// Client signs requests with its chain and then dispatches them.
///
/// A signing failure is returned before anything is sent. Responses are
/// returned as received, including non-2xx ones.
#[derive(Clone, Debug, Default)]
pub struct Client {
    ctx: Context,
    chain: SigningChain,
}

impl Client {
    /// Create a new client without any signer.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            chain: SigningChain::new(),
        }
    }

    /// Append a signer to the chain.
    pub fn with_signer(mut self, signer: impl SignRequest) -> Self {
        self.chain = self.chain.push(signer);
        self
    }

    /// Replace the whole chain.
    pub fn with_chain(mut self, chain: SigningChain) -> Self {
        self.chain = chain;
        self
    }

    /// Context used for signing and sending.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Start building a request against `url`.
    pub fn request(&self, method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// Apply every signer of the chain to `req`.
    pub async fn sign(&self, req: &mut RequestView) -> Result<()> {
        self.chain.sign_request(&self.ctx, req).await
    }

    /// Sign `req` and send it.
    pub async fn send(&self, mut req: RequestView) -> Result<http::Response<Bytes>> {
        self.sign(&mut req).await?;

        debug!("sending {} {}", req.method(), req.uri());
        let resp = self.ctx.http_send(req.into_http_request()?).await?;
        debug!("received {} from server", resp.status());

        Ok(resp)
    }
}
