//! OAuth 1.0a signature engine.
//!
//! `encode` implements the RFC 3986 percent-encoding every other step depends on,
//! `base_string` normalizes a request into the signature base string, and `method`
//! names the supported algorithms. [`SignatureEngine`] ties them together with the
//! consumer's secret material.

pub mod base_string;
pub mod encode;
/// Supported signature methods and the RSA-SHA1 signer seam.
pub mod method;

pub use base_string::*;
pub use encode::*;
pub use method::*;

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Failures raised while computing a signature.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SignatureError {
	/// The requested signature method is not implemented.
	#[error("Signature method `{method}` is not supported.")]
	UnsupportedMethod {
		/// Method name as requested.
		method: String,
	},
	/// The HTTP method cannot be signed by this crate.
	#[error("HTTP method `{method}` is not supported.")]
	UnsupportedHttpMethod {
		/// Method as found on the request.
		method: String,
	},
	/// HMAC and PLAINTEXT signatures need a consumer secret.
	#[error("Signature method {method} requires a consumer secret.")]
	MissingConsumerSecret {
		/// Selected method.
		method: SignatureMethod,
	},
	/// RSA-SHA1 was selected without a private-key signer.
	#[error("Signature method RSA-SHA1 requires a private-key signer.")]
	MissingRsaSigner,
	/// HMAC key could not be initialized.
	#[error("HMAC key is invalid.")]
	InvalidKey,
	/// The private-key signer failed.
	#[error("RSA-SHA1 signing failed: {message}.")]
	RsaSigning {
		/// Message reported by the signer.
		message: String,
	},
}

/// Computes OAuth 1.0a signatures for a single consumer.
#[derive(Clone, Default)]
pub struct SignatureEngine {
	method: SignatureMethod,
	consumer_secret: Option<TokenSecret>,
	rsa_signer: Option<Arc<dyn RsaSha1Signer>>,
}
impl SignatureEngine {
	/// Creates an engine for `method` without any key material.
	pub fn new(method: SignatureMethod) -> Self {
		Self { method, consumer_secret: None, rsa_signer: None }
	}

	/// Attaches the consumer secret used by HMAC and PLAINTEXT.
	pub fn with_consumer_secret(mut self, secret: impl Into<String>) -> Self {
		self.consumer_secret = Some(TokenSecret::new(secret));

		self
	}

	/// Attaches the private-key signer used by RSA-SHA1.
	pub fn with_rsa_signer(mut self, signer: Arc<dyn RsaSha1Signer>) -> Self {
		self.rsa_signer = Some(signer);

		self
	}

	/// Selected signature method.
	pub fn method(&self) -> SignatureMethod {
		self.method
	}

	/// Signs `http_method` + `uri` over `params` (protocol and body parameters; the URI's own
	/// query parameters are merged automatically).
	///
	/// `token_secret` is `None` (or empty) during the request-token leg.
	pub fn compute_signature(
		&self,
		http_method: &str,
		uri: &Url,
		params: &[(String, String)],
		token_secret: Option<&str>,
	) -> Result<String, SignatureError> {
		let token_secret = token_secret.unwrap_or_default();

		match self.method {
			SignatureMethod::HmacSha1 => {
				let key = self.signing_key(token_secret)?;
				let base = signature_base_string(http_method, uri, params);
				let mut mac = <Hmac<Sha1>>::new_from_slice(key.as_bytes())
					.map_err(|_| SignatureError::InvalidKey)?;

				mac.update(base.as_bytes());

				Ok(STANDARD.encode(mac.finalize().into_bytes()))
			},
			SignatureMethod::HmacSha256 => {
				let key = self.signing_key(token_secret)?;
				let base = signature_base_string(http_method, uri, params);
				let mut mac = <Hmac<Sha256>>::new_from_slice(key.as_bytes())
					.map_err(|_| SignatureError::InvalidKey)?;

				mac.update(base.as_bytes());

				Ok(STANDARD.encode(mac.finalize().into_bytes()))
			},
			SignatureMethod::RsaSha1 => {
				let signer = self.rsa_signer.as_ref().ok_or(SignatureError::MissingRsaSigner)?;
				let base = signature_base_string(http_method, uri, params);
				let signature = signer
					.sign(base.as_bytes())
					.map_err(|e| SignatureError::RsaSigning { message: e.to_string() })?;

				Ok(STANDARD.encode(signature))
			},
			SignatureMethod::Plaintext => self.signing_key(token_secret),
		}
	}

	fn signing_key(&self, token_secret: &str) -> Result<String, SignatureError> {
		let consumer_secret = self
			.consumer_secret
			.as_ref()
			.filter(|secret| !secret.is_empty())
			.ok_or(SignatureError::MissingConsumerSecret { method: self.method })?;

		Ok(format!("{}&{}", percent_encode(consumer_secret.expose()), percent_encode(token_secret)))
	}
}
impl Debug for SignatureEngine {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignatureEngine")
			.field("method", &self.method)
			.field("consumer_secret_set", &self.consumer_secret.is_some())
			.field("rsa_signer_set", &self.rsa_signer.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::BoxError;

	fn pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
		values.iter().map(|(key, value)| ((*key).to_owned(), (*value).to_owned())).collect()
	}

	fn photos_params() -> Vec<(String, String)> {
		pairs(&[
			("oauth_consumer_key", "dpf43f3p2l4k3l03"),
			("oauth_token", "nnch734d00sl2jdk"),
			("oauth_signature_method", "HMAC-SHA1"),
			("oauth_timestamp", "1191242096"),
			("oauth_nonce", "kllo9940pd9333jh"),
			("oauth_version", "1.0"),
		])
	}

	#[test]
	fn hmac_sha1_matches_oauth_core_example() {
		let engine =
			SignatureEngine::new(SignatureMethod::HmacSha1).with_consumer_secret("kd94hf93k423kf44");
		let uri = Url::parse("http://photos.example.net/photos?file=vacation.jpg&size=original")
			.expect("Fixture URL should parse.");
		let signature = engine
			.compute_signature("GET", &uri, &photos_params(), Some("pfkkdhi9sl3r4s00"))
			.expect("HMAC-SHA1 signing should succeed.");

		assert_eq!(signature, "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
	}

	#[test]
	fn plaintext_joins_encoded_secrets() {
		let engine = SignatureEngine::new(SignatureMethod::Plaintext).with_consumer_secret("kd94 hf93");
		let uri = Url::parse("https://example.com/").expect("Fixture URL should parse.");

		assert_eq!(
			engine.compute_signature("POST", &uri, &[], None).expect("PLAINTEXT should succeed."),
			"kd94%20hf93&"
		);
		assert_eq!(
			engine
				.compute_signature("POST", &uri, &[], Some("pfk&s"))
				.expect("PLAINTEXT should succeed."),
			"kd94%20hf93&pfk%26s"
		);
	}

	#[test]
	fn hmac_sha256_produces_a_32_byte_digest() {
		let engine = SignatureEngine::new(SignatureMethod::HmacSha256).with_consumer_secret("secret");
		let uri = Url::parse("https://example.com/resource").expect("Fixture URL should parse.");
		let first = engine
			.compute_signature("GET", &uri, &photos_params(), Some("token-secret"))
			.expect("HMAC-SHA256 signing should succeed.");
		let second = engine
			.compute_signature("GET", &uri, &photos_params(), Some("token-secret"))
			.expect("HMAC-SHA256 signing should succeed.");
		let decoded = STANDARD.decode(&first).expect("Signature should be valid base64.");

		assert_eq!(first, second);
		assert_eq!(decoded.len(), 32);
	}

	#[test]
	fn missing_key_material_is_reported() {
		let uri = Url::parse("https://example.com/").expect("Fixture URL should parse.");

		assert_eq!(
			SignatureEngine::new(SignatureMethod::HmacSha1).compute_signature("GET", &uri, &[], None),
			Err(SignatureError::MissingConsumerSecret { method: SignatureMethod::HmacSha1 })
		);
		assert_eq!(
			SignatureEngine::new(SignatureMethod::RsaSha1).compute_signature("GET", &uri, &[], None),
			Err(SignatureError::MissingRsaSigner)
		);
	}

	#[test]
	fn rsa_signer_receives_the_base_string() {
		struct EchoSigner;
		impl RsaSha1Signer for EchoSigner {
			fn sign(&self, base_string: &[u8]) -> Result<Vec<u8>, BoxError> {
				Ok(base_string.to_vec())
			}
		}

		let engine = SignatureEngine::new(SignatureMethod::RsaSha1).with_rsa_signer(Arc::new(EchoSigner));
		let uri = Url::parse("https://example.com/a?b=c").expect("Fixture URL should parse.");
		let signature = engine
			.compute_signature("post", &uri, &pairs(&[("d", "e")]), None)
			.expect("RSA-SHA1 signing should succeed.");
		let decoded = STANDARD.decode(signature).expect("Signature should be valid base64.");

		assert_eq!(decoded, b"POST&https%3A%2F%2Fexample.com%2Fa&b%3Dc%26d%3De");
	}

	#[test]
	fn rsa_signer_failures_surface_their_message() {
		struct FailingSigner;
		impl RsaSha1Signer for FailingSigner {
			fn sign(&self, _base_string: &[u8]) -> Result<Vec<u8>, BoxError> {
				Err("key is locked".into())
			}
		}

		let engine =
			SignatureEngine::new(SignatureMethod::RsaSha1).with_rsa_signer(Arc::new(FailingSigner));
		let uri = Url::parse("https://example.com/").expect("Fixture URL should parse.");

		assert_eq!(
			engine.compute_signature("GET", &uri, &[], None),
			Err(SignatureError::RsaSigning { message: "key is locked".into() })
		);
	}

	#[test]
	fn input_order_does_not_change_the_signature() {
		let engine = SignatureEngine::new(SignatureMethod::HmacSha1).with_consumer_secret("cs");
		let uri = Url::parse("https://example.com/r?z=1&a=2").expect("Fixture URL should parse.");
		let forward = pairs(&[("b", "1"), ("a", "2"), ("a", "1"), ("oauth_nonce", "n")]);
		let mut reversed = forward.clone();

		reversed.reverse();

		assert_eq!(
			engine.compute_signature("GET", &uri, &forward, Some("ts")),
			engine.compute_signature("GET", &uri, &reversed, Some("ts"))
		);
	}
}
