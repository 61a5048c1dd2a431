use http::Method;
use reqauth::hawk::{Config, RequestSigner};
use reqauth::{default_context, Client, Result};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Credentials come from REQAUTH_HAWK_* env values.
    let ctx = default_context();
    let signer = RequestSigner::from_config(&Config::new().from_env(&ctx))?;
    let client = Client::new(ctx).with_signer(signer);

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:8000/resource/1?b=1&a=2".to_string());
    let req = client.request(Method::GET, url).build()?;

    let resp = client.send(req).await?;
    println!("Response status: {}", resp.status());
    println!("{}", String::from_utf8_lossy(resp.body()));

    Ok(())
}
