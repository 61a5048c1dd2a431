use reqauth_core::{Context, OsEnv};
use reqauth_http_send_reqwest::ReqwestHttpSend;

/// Build a context that sends with a default [`reqwest::Client`] and reads
/// the process environment.
pub fn default_context() -> Context {
    with_client(reqwest::Client::new())
}

/// Same as [`default_context`] with a caller configured client.
pub fn with_client(client: reqwest::Client) -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::new(client))
        .with_env(OsEnv)
}
