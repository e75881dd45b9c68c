//! Walks through the three-legged handshake against a live provider with the reqwest transport.
//!
//! Configure the provider through environment variables:
//!
//! - `OAUTH1_CONSUMER_KEY` / `OAUTH1_CONSUMER_SECRET`
//! - `OAUTH1_REQUEST_TOKEN_URL`, `OAUTH1_AUTHORIZE_URL`, `OAUTH1_ACCESS_TOKEN_URL`
//! - `OAUTH1_API_URL` (optional), fetched with the new token once the handshake completes
//!
//! The demo prints the authorization URL, waits for the verifier on stdin, exchanges it, and
//! persists the token in `oauth1-demo-tokens.json`.

// std
use std::{env, io, sync::Arc};
// crates.io
use color_eyre::{Result, eyre::WrapErr};
use url::Url;
// self
use oauth1_broker::{
	auth::ProviderId,
	flows::ReqwestService,
	http::HttpMethod,
	provider::ProviderDescriptor,
	store::{FileStore, TokenStore},
};

fn env_url(name: &str) -> Result<Url> {
	let value = env::var(name).wrap_err_with(|| format!("{name} must be set"))?;

	Ok(Url::parse(&value)?)
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let consumer_key = env::var("OAUTH1_CONSUMER_KEY").wrap_err("OAUTH1_CONSUMER_KEY must be set")?;
	let consumer_secret =
		env::var("OAUTH1_CONSUMER_SECRET").wrap_err("OAUTH1_CONSUMER_SECRET must be set")?;
	let descriptor = ProviderDescriptor::builder(ProviderId::new("demo-provider")?)
		.request_token_endpoint(env_url("OAUTH1_REQUEST_TOKEN_URL")?)
		.authorization_endpoint(env_url("OAUTH1_AUTHORIZE_URL")?)
		.access_token_endpoint(env_url("OAUTH1_ACCESS_TOKEN_URL")?)
		.build()?;
	let store: Arc<dyn TokenStore> = Arc::new(FileStore::open("oauth1-demo-tokens.json")?);
	let service = ReqwestService::new(store, descriptor, consumer_key)
		.with_consumer_secret(consumer_secret);
	let request_token = service.request_request_token().await?;
	let oauth_token = request_token.request_token().unwrap_or_default();

	println!("Authorize the application at:\n{}", service.authorization_uri(oauth_token)?);
	println!("Paste the verifier shown by the provider:");

	let mut verifier = String::new();

	io::stdin().read_line(&mut verifier)?;

	let token = service.request_access_token(oauth_token, verifier.trim(), None).await?;

	println!("Access token stored: {token:?}.");

	if let Ok(api) = env::var("OAUTH1_API_URL") {
		let response = service.send_authorized(HttpMethod::Get, Url::parse(&api)?, &[]).await?;

		println!("{} answered {}: {}", api, response.status, response.body);
	}

	Ok(())
}
