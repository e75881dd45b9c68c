//! Transport primitives for OAuth 1.0a exchanges and signed API calls.
//!
//! The module exposes [`HttpTransport`] alongside the crate-owned [`HttpRequest`] and
//! [`HttpResponse`] values so downstream crates can plug in any HTTP stack. Transports
//! return every response that carries a body, whatever its status: provider failures are
//! detected by parsing the body, not by the status code.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// HTTP methods the broker signs and sends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `DELETE`
	Delete,
	/// `HEAD`
	Head,
}
impl HttpMethod {
	/// Upper-case method token as used in the signature base string.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Patch => "PATCH",
			Self::Delete => "DELETE",
			Self::Head => "HEAD",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outbound request handed to an [`HttpTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Absolute target URL, including any query parameters.
	pub url: Url,
	/// Header name/value pairs in insertion order.
	pub headers: Vec<(String, String)>,
	/// Form-encoded body, if any.
	pub body: Option<String>,
}
impl HttpRequest {
	/// Content type used for form bodies.
	pub const FORM_CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded";

	/// Creates a request without headers or body.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		Self { method, url, headers: Vec::new(), body: None }
	}

	/// Appends a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Sets a form-encoded body built from `params` and the matching content type.
	pub fn form(mut self, params: &[(String, String)]) -> Self {
		let body = url::form_urlencoded::Serializer::new(String::new())
			.extend_pairs(params.iter().map(|(key, value)| (key.as_str(), value.as_str())))
			.finish();

		self.body = Some(body);

		self.header("Content-Type", Self::FORM_CONTENT_TYPE)
	}
}

/// Response returned by an [`HttpTransport`], regardless of status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
	/// Numeric HTTP status.
	pub status: u16,
	/// Response headers; names are lower-cased by most transports.
	pub headers: Vec<(String, String)>,
	/// Response body decoded as text.
	pub body: String,
}
impl HttpResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Case-insensitive header lookup.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}
}

/// Abstraction over HTTP stacks capable of sending signed OAuth requests.
///
/// The trait is the broker's only dependency on an HTTP client. Implementations must be
/// `Send + Sync + 'static` so a single transport can be shared across services, and must
/// surface the underlying error message unchanged when a request fails before a response
/// arrives. No retries happen at this layer.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and returns the response, whatever its status.
	fn send(&self, request: HttpRequest) -> TransportFuture<'_, HttpResponse>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token endpoints answer directly; configure any custom [`ReqwestClient`] to avoid following
/// redirects if the provider should not be allowed to bounce signed requests elsewhere.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_, HttpResponse> {
		Box::pin(async move {
			let mut builder = self.0.request(request.method.into(), request.url);

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let headers = response
				.headers()
				.iter()
				.map(|(name, value)| {
					(name.as_str().to_owned(), String::from_utf8_lossy(value.as_bytes()).into_owned())
				})
				.collect();
			let body = response.text().await?;

			Ok(HttpResponse { status, headers, body })
		})
	}
}
#[cfg(feature = "reqwest")]
impl From<HttpMethod> for reqwest::Method {
	fn from(value: HttpMethod) -> Self {
		match value {
			HttpMethod::Get => Self::GET,
			HttpMethod::Post => Self::POST,
			HttpMethod::Put => Self::PUT,
			HttpMethod::Patch => Self::PATCH,
			HttpMethod::Delete => Self::DELETE,
			HttpMethod::Head => Self::HEAD,
		}
	}
}
#[cfg(feature = "reqwest")]
impl TryFrom<&reqwest::Method> for HttpMethod {
	type Error = crate::signature::SignatureError;

	fn try_from(value: &reqwest::Method) -> Result<Self, Self::Error> {
		match value.as_str() {
			"GET" => Ok(Self::Get),
			"POST" => Ok(Self::Post),
			"PUT" => Ok(Self::Put),
			"PATCH" => Ok(Self::Patch),
			"DELETE" => Ok(Self::Delete),
			"HEAD" => Ok(Self::Head),
			other => Err(crate::signature::SignatureError::UnsupportedHttpMethod {
				method: other.to_owned(),
			}),
		}
	}
}
