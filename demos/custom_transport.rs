//! Demonstrates driving the full handshake over a custom [`HttpTransport`].
//!
//! 1. Implement [`HttpTransport`] so each request is answered from a local script instead of
//!    the network.
//! 2. Pass the transport to [`Service::with_http_client`] together with a token store.
//! 3. Run the request-token, authorization, access-token, and refresh legs, then sign an API
//!    call with the stored token.
//! 4. Swap in a failing transport to see its error surface unchanged.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
use time::Duration;
use url::Url;
// self
use oauth1_broker::{
	auth::ProviderId,
	error::TransportError,
	flows::Service,
	http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportFuture},
	provider::{ProviderDescriptor, ProviderQuirks},
	store::{MemoryStore, TokenStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let store: Arc<dyn TokenStore> = Arc::new(MemoryStore::default());
	let descriptor = ProviderDescriptor::builder(ProviderId::new("scripted-provider")?)
		.request_token_endpoint(Url::parse("https://provider.example.com/oauth/request_token")?)
		.authorization_endpoint(Url::parse("https://provider.example.com/oauth/authorize")?)
		.access_token_endpoint(Url::parse("https://provider.example.com/oauth/access_token")?)
		.quirks(ProviderQuirks {
			supports_refresh: true,
			refresh_window_fallback: Some(Duration::days(30)),
			..ProviderQuirks::default()
		})
		.build()?;
	let service: Service<ScriptedTransport> = Service::with_http_client(
		Arc::clone(&store),
		descriptor.clone(),
		"demo-consumer",
		Arc::new(ScriptedTransport::Answer),
	)
	.with_consumer_secret("demo-secret");
	let request_token = service.request_request_token().await?;
	let oauth_token = request_token.request_token().unwrap_or_default();

	println!("Send the user to {}.", service.authorization_uri(oauth_token)?);

	let access = service.request_access_token(oauth_token, "demo-verifier", None).await?;

	println!(
		"Access token issued by the scripted transport: {:?}, refresh window ends {:?}.",
		access.access_token(),
		access.refresh_expires_at()
	);

	let renewed = service.refresh_access_token(&access).await?;

	println!("Refreshed access token: {:?}.", renewed.access_token());

	let response = service
		.send_authorized(
			HttpMethod::Post,
			Url::parse("https://provider.example.com/api/status")?,
			&[("status".into(), "Hello from a custom transport".into())],
		)
		.await?;

	println!("API call answered with {}: {}.", response.status, response.body);

	let failing: Service<ScriptedTransport> = Service::with_http_client(
		store,
		descriptor,
		"demo-consumer",
		Arc::new(ScriptedTransport::Fail(ScriptedError::DnsFailure {
			host: "provider.example.com",
		})),
	)
	.with_consumer_secret("demo-secret");

	match failing.request_request_token().await {
		Ok(_) => println!("Failing transport unexpectedly succeeded."),
		Err(e) => println!("Transport error surfaced by the service: {e}."),
	}

	Ok(())
}

#[derive(Clone, Debug)]
enum ScriptedError {
	DnsFailure { host: &'static str },
}
impl Display for ScriptedError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::DnsFailure { host } => write!(f, "DNS lookup failed for {host}"),
		}
	}
}
impl StdError for ScriptedError {}

enum ScriptedTransport {
	Answer,
	Fail(ScriptedError),
}
impl ScriptedTransport {
	fn answer(request: &HttpRequest) -> HttpResponse {
		let body = match request.url.path() {
			"/oauth/request_token" =>
				"oauth_token=demo-request&oauth_token_secret=demo-request-secret&oauth_callback_confirmed=true",
			"/oauth/access_token" if request.body.is_some() =>
				"oauth_token=demo-access-2&oauth_token_secret=demo-access-secret-2&oauth_expires_in=3600",
			"/oauth/access_token" =>
				"oauth_token=demo-access&oauth_token_secret=demo-access-secret&oauth_session_handle=demo-handle&oauth_expires_in=3600",
			_ => "{\"ok\":true}",
		};

		HttpResponse { status: 200, headers: Vec::new(), body: body.to_owned() }
	}
}
impl HttpTransport for ScriptedTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_, HttpResponse> {
		let outcome = match self {
			Self::Answer => Ok(Self::answer(&request)),
			Self::Fail(error) => Err(TransportError::network(error.clone())),
		};

		Box::pin(async move { outcome })
	}
}
