//! Provider descriptor data structures shared by all flows.
//!
//! A descriptor is plain configuration: endpoints, signature method, callback, the
//! response field table, and quirk toggles. Consumer credentials are not part of it.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Response field-name table.
pub mod fields;
/// Provider-specific quirk toggles.
pub mod quirks;

pub use builder::*;
pub use fields::*;
pub use quirks::*;

// self
use crate::{_prelude::*, auth::ProviderId, signature::SignatureMethod};

/// Callback announced during the request-token leg.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Callback {
	/// Out-of-band (`oob`); the user copies the verifier manually.
	#[default]
	OutOfBand,
	/// Redirect target receiving `oauth_token` and `oauth_verifier`.
	Url(Url),
}
impl Callback {
	/// Wire value for out-of-band callbacks.
	pub const OUT_OF_BAND: &'static str = "oob";

	/// Returns the `oauth_callback` value.
	pub fn as_str(&self) -> &str {
		match self {
			Self::OutOfBand => Self::OUT_OF_BAND,
			Self::Url(url) => url.as_str(),
		}
	}
}
impl Display for Callback {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Callback {
	type Err = url::ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s == Self::OUT_OF_BAND { Ok(Self::OutOfBand) } else { Url::parse(s).map(Self::Url) }
	}
}
impl TryFrom<String> for Callback {
	type Error = url::ParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
impl From<Callback> for String {
	fn from(value: Callback) -> Self {
		value.as_str().to_owned()
	}
}

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Temporary credential (request token) endpoint.
	pub request_token: Url,
	/// Resource-owner authorization page.
	pub authorization: Url,
	/// Token credential (access token) endpoint, also used for refreshes.
	pub access_token: Url,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier; also the storage key.
	pub id: ProviderId,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Method used to sign every request to this provider.
	#[serde(default)]
	pub signature_method: SignatureMethod,
	/// Callback sent during the request-token leg.
	#[serde(default)]
	pub callback: Callback,
	/// Names of the response fields mapped onto [`Token`](crate::auth::Token).
	#[serde(default)]
	pub fields: ResponseFields,
	/// Provider-specific quirks.
	#[serde(default)]
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Returns `true` when the provider renews access tokens through a refresh leg.
	pub fn supports_refresh(&self) -> bool {
		self.quirks.supports_refresh
	}
}
