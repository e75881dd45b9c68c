// std
use std::{io, sync::Arc};
// crates.io
use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
// self
use oauth1_broker::{
	auth::{ProviderId, Token},
	error::{Error, TransportError},
	flows::Service,
	http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportFuture},
	provider::{ProviderDescriptor, ProviderQuirks},
	store::{MemoryStore, StoreError, TokenStore},
	url::Url,
};

const CONSUMER_KEY: &str = "transport-consumer";
const CONSUMER_SECRET: &str = "transport-secret";

/// Transport double that records every request and answers with a canned response.
#[derive(Default)]
struct RecordingTransport {
	requests: Mutex<Vec<HttpRequest>>,
	failure: Option<&'static str>,
}
impl RecordingTransport {
	fn failing(message: &'static str) -> Self {
		Self { requests: Mutex::default(), failure: Some(message) }
	}

	fn last(&self) -> HttpRequest {
		self.requests.lock().last().cloned().expect("Transport should have recorded a request.")
	}
}
impl HttpTransport for RecordingTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_, HttpResponse> {
		self.requests.lock().push(request);

		let failure = self.failure;

		Box::pin(async move {
			match failure {
				Some(message) => Err(TransportError::network(io::Error::other(message))),
				None => Ok(HttpResponse {
					status: 200,
					headers: vec![("content-type".into(), "application/json".into())],
					body: "{\"ok\":true}".into(),
				}),
			}
		})
	}
}

fn provider_id() -> ProviderId {
	ProviderId::new("fake-transport").expect("Provider identifier should be valid.")
}

fn endpoint(path: &str) -> Url {
	Url::parse(&format!("https://api.example.com/oauth/{path}"))
		.expect("Fake endpoint URL should parse.")
}

fn build_descriptor(quirks: ProviderQuirks) -> ProviderDescriptor {
	ProviderDescriptor::builder(provider_id())
		.request_token_endpoint(endpoint("request_token"))
		.authorization_endpoint(endpoint("authorize"))
		.access_token_endpoint(endpoint("access_token"))
		.quirks(quirks)
		.build()
		.expect("Descriptor should build for the fake transport.")
}

async fn build_service(
	transport: Arc<RecordingTransport>,
	quirks: ProviderQuirks,
) -> Service<RecordingTransport> {
	let store = Arc::new(MemoryStore::default());
	let token = Token::builder()
		.access_token("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00")
		.build()
		.expect("Access token fixture should build.");

	store.set(&provider_id(), token).await.expect("Seeding the store should succeed.");

	Service::with_http_client(store, build_descriptor(quirks), CONSUMER_KEY, transport)
		.with_consumer_secret(CONSUMER_SECRET)
}

fn parse_authorization(value: &str) -> Vec<(String, String)> {
	value
		.strip_prefix("OAuth ")
		.expect("Authorization header should use the OAuth scheme.")
		.split(", ")
		.map(|pair| {
			let (key, quoted) =
				pair.split_once('=').expect("Authorization parameters should be key=value pairs.");
			let value = quoted.trim_matches('"');

			(
				percent_decode_str(key).decode_utf8_lossy().into_owned(),
				percent_decode_str(value).decode_utf8_lossy().into_owned(),
			)
		})
		.collect()
}

#[tokio::test]
async fn authorized_post_carries_a_verifiable_signature() {
	let transport = Arc::new(RecordingTransport::default());
	let service = build_service(transport.clone(), ProviderQuirks::default()).await;
	let uri = Url::parse("https://api.example.com/1/statuses/update.json?include_entities=true")
		.expect("API URL should parse.");
	let body = [("status".to_owned(), "Hello Ladies + Gentlemen".to_owned())];
	let response = service
		.send_authorized(HttpMethod::Post, uri.clone(), &body)
		.await
		.expect("Authorized call should succeed over the fake transport.");

	assert!(response.is_success());
	assert_eq!(response.header("Content-Type"), Some("application/json"));

	let request = transport.last();

	assert_eq!(request.method, HttpMethod::Post);
	assert_eq!(request.url, uri);
	assert_eq!(request.body.as_deref(), Some("status=Hello+Ladies+%2B+Gentlemen"));
	assert!(
		request
			.headers
			.iter()
			.any(|(name, value)| name == "Content-Type" && value == HttpRequest::FORM_CONTENT_TYPE)
	);

	let header = request
		.headers
		.iter()
		.find(|(name, _)| name == "Authorization")
		.map(|(_, value)| value.clone())
		.expect("Authorized call should carry an Authorization header.");
	let mut params = parse_authorization(&header);
	let signature = params
		.iter()
		.position(|(key, _)| key == "oauth_signature")
		.map(|idx| params.remove(idx).1)
		.expect("Authorization header should carry a signature.");

	assert!(params.iter().all(|(key, _)| key.starts_with("oauth_")));
	assert!(params.contains(&("oauth_token".into(), "nnch734d00sl2jdk".into())));
	assert!(params.contains(&("oauth_consumer_key".into(), CONSUMER_KEY.into())));

	params.extend(body.iter().cloned());

	let expected = service
		.signature_engine()
		.compute_signature("POST", &uri, &params, Some("pfkkdhi9sl3r4s00"))
		.expect("Recomputing the signature should succeed.");

	assert_eq!(signature, expected);
}

#[tokio::test]
async fn query_string_auth_moves_parameters_into_the_url() {
	let transport = Arc::new(RecordingTransport::default());
	let quirks = ProviderQuirks { query_string_auth: true, ..ProviderQuirks::default() };
	let service = build_service(transport.clone(), quirks).await;
	let uri = Url::parse("https://api.example.com/v1/user/profile?format=json")
		.expect("API URL should parse.");

	service
		.send_authorized(HttpMethod::Get, uri, &[])
		.await
		.expect("Query-string authorized call should succeed.");

	let request = transport.last();
	let pairs = request.url.query_pairs().into_owned().collect::<Vec<_>>();

	assert!(request.headers.iter().all(|(name, _)| name != "Authorization"));
	assert_eq!(pairs.first(), Some(&("format".to_owned(), "json".to_owned())));
	assert!(pairs.iter().any(|(key, value)| key == "oauth_token" && value == "nnch734d00sl2jdk"));
	assert!(pairs.iter().any(|(key, _)| key == "oauth_signature"));
	assert_eq!(request.body, None);

	transport.requests.lock().clear();
	service
		.send_authorized(HttpMethod::Delete, request.url.clone(), &[])
		.await
		.expect("Non-GET calls should still succeed.");

	assert!(transport.last().headers.iter().any(|(name, _)| name == "Authorization"));
}

#[tokio::test]
async fn transport_failures_surface_verbatim() {
	let transport = Arc::new(RecordingTransport::failing("connection reset by peer"));
	let service = build_service(transport.clone(), ProviderQuirks::default()).await;
	let err = service
		.send_authorized(
			HttpMethod::Get,
			Url::parse("https://api.example.com/v1/me").expect("API URL should parse."),
			&[],
		)
		.await
		.expect_err("Transport failures should propagate.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert_eq!(err.to_string(), "connection reset by peer");
	assert_eq!(transport.requests.lock().len(), 1);
}

#[tokio::test]
async fn missing_tokens_fail_before_sending() {
	let transport = Arc::new(RecordingTransport::default());
	let store = Arc::new(MemoryStore::default());
	let service: Service<RecordingTransport> = Service::with_http_client(
		store,
		build_descriptor(ProviderQuirks::default()),
		CONSUMER_KEY,
		transport.clone(),
	)
	.with_consumer_secret(CONSUMER_SECRET);
	let err = service
		.send_authorized(
			HttpMethod::Get,
			Url::parse("https://api.example.com/v1/me").expect("API URL should parse."),
			&[],
		)
		.await
		.expect_err("Calls without a stored token should fail.");

	assert!(matches!(err, Error::Storage(StoreError::NotFound { .. })));
	assert!(transport.requests.lock().is_empty());
}
