//! The OAuth 1.0a handshake legs and signed API calls, driven through [`Service`].
//!
//! The handshake moves a provider from unauthenticated to authorized in three legs:
//! [`Service::request_request_token`], [`Service::authorization_uri`] (the user leaves the
//! application), and [`Service::request_access_token`]. Providers implementing the OAuth
//! Session extension can then renew with [`Service::refresh_access_token`]. Every other
//! call is signed with [`Service::authorize_request`] or sent with
//! [`Service::send_authorized`].

pub mod access_token;
pub mod api;
pub mod authorize;
pub mod common;
pub mod refresh;
pub mod request_token;

pub use refresh::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	http::HttpTransport,
	provider::{FormResponseParser, ProviderDescriptor, ResponseParser},
	signature::RsaSha1Signer,
	store::TokenStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Service specialized for the crate's default reqwest transport.
pub type ReqwestService = Service<ReqwestHttpClient>;

/// Drives the OAuth 1.0a handshake against a single provider descriptor.
///
/// The service owns the HTTP transport, token store, descriptor, and response parser so
/// each leg only deals with its own parameters. Consumer credentials live here rather than
/// on the descriptor, keeping descriptors free of secrets. No state is kept between calls
/// apart from what the store persists.
#[derive(Clone)]
pub struct Service<C>
where
	C: HttpTransport,
{
	/// HTTP transport used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Token store; tokens are keyed by the descriptor's id.
	pub store: Arc<dyn TokenStore>,
	/// Provider descriptor that defines endpoints, field names, and quirks.
	pub descriptor: ProviderDescriptor,
	/// Parser turning token-endpoint bodies into tokens.
	pub parser: Arc<dyn ResponseParser>,
	/// Consumer key sent as `oauth_consumer_key`.
	pub consumer_key: String,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	consumer_secret: Option<TokenSecret>,
	rsa_signer: Option<Arc<dyn RsaSha1Signer>>,
}
impl<C> Service<C>
where
	C: HttpTransport,
{
	/// Creates a service that reuses the caller-provided transport.
	pub fn with_http_client(
		store: Arc<dyn TokenStore>,
		descriptor: ProviderDescriptor,
		consumer_key: impl Into<String>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			store,
			descriptor,
			parser: Arc::new(FormResponseParser),
			consumer_key: consumer_key.into(),
			refresh_metrics: Default::default(),
			consumer_secret: None,
			rsa_signer: None,
		}
	}

	/// Sets the consumer secret used by HMAC and PLAINTEXT signatures.
	pub fn with_consumer_secret(mut self, secret: impl Into<String>) -> Self {
		self.consumer_secret = Some(TokenSecret::new(secret));

		self
	}

	/// Sets the private-key signer used by RSA-SHA1 signatures.
	pub fn with_rsa_signer(mut self, signer: Arc<dyn RsaSha1Signer>) -> Self {
		self.rsa_signer = Some(signer);

		self
	}

	/// Replaces the default form-encoded response parser.
	pub fn with_parser(mut self, parser: Arc<dyn ResponseParser>) -> Self {
		self.parser = parser;

		self
	}
}
#[cfg(feature = "reqwest")]
impl Service<ReqwestHttpClient> {
	/// Creates a new service for the provided descriptor and consumer key.
	///
	/// The service provisions its own reqwest-backed transport. Use
	/// [`Service::with_consumer_secret`] or [`Service::with_rsa_signer`] to attach the
	/// key material required by the descriptor's signature method.
	pub fn new(
		store: Arc<dyn TokenStore>,
		descriptor: ProviderDescriptor,
		consumer_key: impl Into<String>,
	) -> Self {
		Self::with_http_client(store, descriptor, consumer_key, ReqwestHttpClient::default())
	}
}
impl<C> Debug for Service<C>
where
	C: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Service")
			.field("descriptor", &self.descriptor)
			.field("consumer_key", &self.consumer_key)
			.field("consumer_secret_set", &self.consumer_secret.is_some())
			.field("rsa_signer_set", &self.rsa_signer.is_some())
			.finish()
	}
}
