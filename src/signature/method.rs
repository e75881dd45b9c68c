// self
use crate::{_prelude::*, error::BoxError, signature::SignatureError};

/// OAuth 1.0a signature methods understood by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SignatureMethod {
	/// `HMAC-SHA1` (RFC 5849 §3.4.2).
	#[default]
	HmacSha1,
	/// `HMAC-SHA256`, the same construction over SHA-256.
	HmacSha256,
	/// `RSA-SHA1` (RFC 5849 §3.4.3); needs an [`RsaSha1Signer`].
	RsaSha1,
	/// `PLAINTEXT` (RFC 5849 §3.4.4).
	Plaintext,
}
impl SignatureMethod {
	/// Returns the `oauth_signature_method` value.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::HmacSha1 => "HMAC-SHA1",
			Self::HmacSha256 => "HMAC-SHA256",
			Self::RsaSha1 => "RSA-SHA1",
			Self::Plaintext => "PLAINTEXT",
		}
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for SignatureMethod {
	type Err = SignatureError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"HMAC-SHA1" => Ok(Self::HmacSha1),
			"HMAC-SHA256" => Ok(Self::HmacSha256),
			"RSA-SHA1" => Ok(Self::RsaSha1),
			"PLAINTEXT" => Ok(Self::Plaintext),
			other => Err(SignatureError::UnsupportedMethod { method: other.to_owned() }),
		}
	}
}
impl TryFrom<String> for SignatureMethod {
	type Error = SignatureError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
impl From<SignatureMethod> for String {
	fn from(value: SignatureMethod) -> Self {
		value.as_str().to_owned()
	}
}

/// Private-key collaborator for `RSA-SHA1`.
///
/// Key loading and storage stay with the application; the engine hands over the
/// signature base string and base64-encodes whatever PKCS#1 v1.5 signature comes back.
pub trait RsaSha1Signer
where
	Self: Send + Sync,
{
	/// Signs `base_string` with the consumer's private key.
	fn sign(&self, base_string: &[u8]) -> Result<Vec<u8>, BoxError>;
}
