//! Request signing contracts that let downstream crates attach an authorized token's
//! signature to arbitrary HTTP clients.

// self
use crate::auth::Token;
#[cfg(feature = "reqwest")]
use crate::{
	_prelude::*,
	error::ConfigError,
	flows::Service,
	http::{HttpMethod, HttpRequest, HttpTransport},
};

/// Describes how to sign an outbound request with a [`Token`] without constraining the
/// HTTP client type.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and returns it carrying OAuth 1.0a authorization
	/// derived from `token`.
	fn attach_token(&self, request: Request, token: &Token) -> Result<Request, Error>;
}

#[cfg(feature = "reqwest")]
impl<C> RequestSignerExt<reqwest::Request, Error> for Service<C>
where
	C: HttpTransport,
{
	fn attach_token(
		&self,
		mut request: reqwest::Request,
		token: &Token,
	) -> Result<reqwest::Request, Error> {
		let method = HttpMethod::try_from(request.method())?;
		let body_params = form_params(&request);
		let authorization = self.authorize_request(method, request.url(), token, &body_params)?;

		if self.descriptor.quirks.query_string_auth && method == HttpMethod::Get {
			authorization.apply_to_url(request.url_mut());
		} else {
			let value = reqwest::header::HeaderValue::from_str(&authorization.header_value())
				.map_err(|e| ConfigError::InvalidHeader { source: Box::new(e) })?;

			request.headers_mut().insert(reqwest::header::AUTHORIZATION, value);
		}

		Ok(request)
	}
}

/// Decoded pairs of a buffered form body; empty for any other body.
#[cfg(feature = "reqwest")]
fn form_params(request: &reqwest::Request) -> Vec<(String, String)> {
	let is_form = request
		.headers()
		.get(reqwest::header::CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
		.is_some_and(|value| value.starts_with(HttpRequest::FORM_CONTENT_TYPE));

	match request.body().and_then(reqwest::Body::as_bytes) {
		Some(bytes) if is_form => url::form_urlencoded::parse(bytes).into_owned().collect(),
		_ => Vec::new(),
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::*,
		auth::ProviderId,
		provider::{ProviderDescriptor, ProviderQuirks},
	};

	fn endpoint(path: &str) -> Url {
		Url::parse(&format!("https://api.example.com/{path}"))
			.expect("Endpoint URL should parse.")
	}

	fn descriptor(query_string_auth: bool) -> ProviderDescriptor {
		ProviderDescriptor::builder(ProviderId::new("signer").expect("Provider id should be valid."))
			.request_token_endpoint(endpoint("request"))
			.authorization_endpoint(endpoint("authorize"))
			.access_token_endpoint(endpoint("access"))
			.quirks(ProviderQuirks { query_string_auth, ..ProviderQuirks::default() })
			.build()
			.expect("Descriptor fixture should be valid.")
	}

	fn token() -> Token {
		Token::builder()
			.access_token("access-token", "access-secret")
			.build()
			.expect("Token fixture should build.")
	}

	#[test]
	fn header_is_attached_and_form_body_is_signed_but_not_leaked() {
		let (service, _) = build_reqwest_test_service(descriptor(false), "ck", "cs");
		let request = ReqwestClient::new()
			.post("https://api.example.com/statuses/update.json")
			.header(reqwest::header::CONTENT_TYPE, HttpRequest::FORM_CONTENT_TYPE)
			.body("status=hello+world")
			.build()
			.expect("Request fixture should build.");
		let signed = service.attach_token(request, &token()).expect("Signing should succeed.");
		let header = signed
			.headers()
			.get(reqwest::header::AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.expect("Authorization header should be attached.");

		assert!(header.starts_with("OAuth oauth_consumer_key=\"ck\""));
		assert!(header.contains("oauth_token=\"access-token\""));
		assert!(!header.contains("status"));
		assert_eq!(
			form_params(&signed),
			vec![("status".to_owned(), "hello world".to_owned())]
		);
	}

	#[test]
	fn query_string_auth_moves_parameters_into_the_url() {
		let (service, _) = build_reqwest_test_service(descriptor(true), "ck", "cs");
		let request = ReqwestClient::new()
			.get("https://api.example.com/profile?format=json")
			.build()
			.expect("Request fixture should build.");
		let signed = service.attach_token(request, &token()).expect("Signing should succeed.");
		let query = signed.url().query().expect("Signed URL should carry a query.");

		assert!(signed.headers().get(reqwest::header::AUTHORIZATION).is_none());
		assert!(query.starts_with("format=json&oauth_consumer_key=ck"));
		assert!(query.contains("oauth_signature="));
	}

	#[test]
	fn tokens_without_access_credentials_are_rejected() {
		let (service, _) = build_reqwest_test_service(descriptor(false), "ck", "cs");
		let request_only = Token::builder()
			.request_token("request", "secret")
			.build()
			.expect("Request token fixture should build.");
		let request = ReqwestClient::new()
			.get("https://api.example.com/profile")
			.build()
			.expect("Request fixture should build.");
		let err = service
			.attach_token(request, &request_only)
			.expect_err("Request tokens cannot sign API calls.");

		assert!(matches!(err, Error::Config(ConfigError::MissingAccessToken)));
	}
}
