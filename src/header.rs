//! OAuth 1.0a protocol parameter generation and `Authorization` header rendering.
//!
//! [`ProtocolParams`] collects the `oauth_*` values for one request, [`build_authorization`]
//! signs them together with the request's query and body parameters, and the resulting
//! [`AuthorizationHeader`] renders either the `OAuth ...` header or an equivalent query string.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	signature::{OAUTH_SIGNATURE, SignatureEngine, SignatureError, SignatureMethod, percent_encode},
};

/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

const NONCE_LEN: usize = 32;

/// The `oauth_*` parameters of a single request, kept in generation order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolParams {
	consumer_key: String,
	nonce: String,
	signature_method: SignatureMethod,
	timestamp: i64,
	callback: Option<String>,
	token: Option<String>,
	verifier: Option<String>,
}
impl ProtocolParams {
	/// Draws a fresh nonce and the current Unix timestamp.
	pub fn generate(consumer_key: impl Into<String>, signature_method: SignatureMethod) -> Self {
		Self::fixed(
			consumer_key,
			signature_method,
			generate_nonce(NONCE_LEN),
			OffsetDateTime::now_utc().unix_timestamp(),
		)
	}

	/// Uses a caller-supplied nonce and timestamp; signatures become reproducible.
	pub fn fixed(
		consumer_key: impl Into<String>,
		signature_method: SignatureMethod,
		nonce: impl Into<String>,
		timestamp: i64,
	) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			nonce: nonce.into(),
			signature_method,
			timestamp,
			callback: None,
			token: None,
			verifier: None,
		}
	}

	/// Sets `oauth_callback` (request-token leg only).
	pub fn callback(mut self, callback: impl Into<String>) -> Self {
		self.callback = Some(callback.into());

		self
	}

	/// Sets `oauth_token`; any callback is dropped since the two never travel together.
	pub fn token(mut self, token: impl Into<String>) -> Self {
		self.callback = None;
		self.token = Some(token.into());

		self
	}

	/// Sets `oauth_verifier` (access-token leg only).
	pub fn verifier(mut self, verifier: impl Into<String>) -> Self {
		self.verifier = Some(verifier.into());

		self
	}

	/// Nonce carried by these parameters.
	pub fn nonce(&self) -> &str {
		&self.nonce
	}

	/// Unix timestamp carried by these parameters.
	pub fn timestamp(&self) -> i64 {
		self.timestamp
	}

	/// Signature method advertised as `oauth_signature_method`.
	pub fn signature_method(&self) -> SignatureMethod {
		self.signature_method
	}

	fn into_pairs(self) -> Vec<(String, String)> {
		let mut pairs = vec![
			("oauth_consumer_key".to_owned(), self.consumer_key),
			("oauth_nonce".to_owned(), self.nonce),
			("oauth_signature_method".to_owned(), self.signature_method.as_str().to_owned()),
			("oauth_timestamp".to_owned(), self.timestamp.to_string()),
			("oauth_version".to_owned(), OAUTH_VERSION.to_owned()),
		];

		if let Some(callback) = self.callback {
			pairs.push(("oauth_callback".to_owned(), callback));
		}
		if let Some(token) = self.token {
			pairs.push(("oauth_token".to_owned(), token));
		}
		if let Some(verifier) = self.verifier {
			pairs.push(("oauth_verifier".to_owned(), verifier));
		}

		pairs
	}
}

/// Signed `oauth_*` parameters ready to be rendered onto a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationHeader {
	params: Vec<(String, String)>,
}
impl AuthorizationHeader {
	/// Header name the rendered value belongs under.
	pub const NAME: &'static str = "Authorization";

	/// Ordered `oauth_*` pairs, `oauth_signature` last.
	pub fn params(&self) -> &[(String, String)] {
		&self.params
	}

	/// Looks up a single protocol parameter.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// The computed `oauth_signature`.
	pub fn signature(&self) -> Option<&str> {
		self.get(OAUTH_SIGNATURE)
	}

	/// Renders `OAuth k1="v1", k2="v2", ...` with percent-encoded keys and values.
	pub fn header_value(&self) -> String {
		let mut buf = String::from("OAuth ");

		for (idx, (key, value)) in self.params.iter().enumerate() {
			if idx > 0 {
				buf.push_str(", ");
			}

			buf.push_str(&percent_encode(key));
			buf.push_str("=\"");
			buf.push_str(&percent_encode(value));
			buf.push('"');
		}

		buf
	}

	/// Renders the same parameters as a query string.
	pub fn to_query(&self) -> String {
		self.params
			.iter()
			.map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
			.collect::<Vec<_>>()
			.join("&")
	}

	/// Appends the parameters to `url`'s query for query-string authentication.
	pub fn apply_to_url(&self, url: &mut Url) {
		let query = match url.query() {
			Some(existing) if !existing.is_empty() => format!("{existing}&{}", self.to_query()),
			_ => self.to_query(),
		};

		url.set_query(Some(&query));
	}
}
impl Display for AuthorizationHeader {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.header_value())
	}
}

/// Signs a request and returns its authorization parameters.
///
/// `body_params` are the decoded pairs of a form-encoded body. They take part in the signature
/// but never appear in the returned header. Query parameters are read from `uri`.
pub fn build_authorization(
	engine: &SignatureEngine,
	http_method: &str,
	uri: &Url,
	params: ProtocolParams,
	token_secret: Option<&str>,
	body_params: &[(String, String)],
) -> Result<AuthorizationHeader, SignatureError> {
	let mut protocol = params.into_pairs();
	let signed = protocol.iter().chain(body_params.iter()).cloned().collect::<Vec<_>>();
	let signature = engine.compute_signature(http_method, uri, &signed, token_secret)?;

	protocol.push((OAUTH_SIGNATURE.to_owned(), signature));

	Ok(AuthorizationHeader { params: protocol })
}

fn generate_nonce(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
