// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	provider::{Callback, ProviderDescriptor, ProviderEndpoints, ProviderQuirks, ResponseFields},
	signature::SignatureMethod,
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProviderDescriptorError {
	/// Request-token endpoint is mandatory.
	#[error("Missing request token endpoint.")]
	MissingRequestTokenEndpoint,
	/// Authorization endpoint is mandatory.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Access-token endpoint is mandatory.
	#[error("Missing access token endpoint.")]
	MissingAccessTokenEndpoint,
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// A response field name is blank.
	#[error("Response field `{field}` must not be empty.")]
	EmptyResponseField {
		/// Table entry that was left blank.
		field: &'static str,
	},
	/// Refresh fallback window must be positive.
	#[error("Refresh window fallback must be positive.")]
	NonPositiveRefreshWindow,
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: ProviderId,
	/// Temporary credential endpoint.
	pub request_token_endpoint: Option<Url>,
	/// Resource-owner authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Token credential endpoint.
	pub access_token_endpoint: Option<Url>,
	/// Signature method used for every request.
	pub signature_method: SignatureMethod,
	/// Callback announced on the request-token leg.
	pub callback: Callback,
	/// Response field table.
	pub fields: ResponseFields,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			request_token_endpoint: None,
			authorization_endpoint: None,
			access_token_endpoint: None,
			signature_method: SignatureMethod::default(),
			callback: Callback::default(),
			fields: ResponseFields::default(),
			quirks: ProviderQuirks::default(),
		}
	}

	/// Sets the request-token endpoint.
	pub fn request_token_endpoint(mut self, url: Url) -> Self {
		self.request_token_endpoint = Some(url);

		self
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the access-token endpoint.
	pub fn access_token_endpoint(mut self, url: Url) -> Self {
		self.access_token_endpoint = Some(url);

		self
	}

	/// Overrides the signature method.
	pub fn signature_method(mut self, method: SignatureMethod) -> Self {
		self.signature_method = method;

		self
	}

	/// Overrides the callback.
	pub fn callback(mut self, callback: Callback) -> Self {
		self.callback = callback;

		self
	}

	/// Overrides the response field table.
	pub fn fields(mut self, fields: ResponseFields) -> Self {
		self.fields = fields;

		self
	}

	/// Overrides the provider quirks.
	pub fn quirks(mut self, quirks: ProviderQuirks) -> Self {
		self.quirks = quirks;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let request_token = self
			.request_token_endpoint
			.ok_or(ProviderDescriptorError::MissingRequestTokenEndpoint)?;
		let authorization = self
			.authorization_endpoint
			.ok_or(ProviderDescriptorError::MissingAuthorizationEndpoint)?;
		let access_token =
			self.access_token_endpoint.ok_or(ProviderDescriptorError::MissingAccessTokenEndpoint)?;
		let descriptor = ProviderDescriptor {
			id: self.id,
			endpoints: ProviderEndpoints { request_token, authorization, access_token },
			signature_method: self.signature_method,
			callback: self.callback,
			fields: self.fields,
			quirks: self.quirks,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	///
	/// Descriptors deserialized from configuration bypass the builder, so callers loading
	/// them should run this check before handing them to a [`Service`](crate::flows::Service).
	pub fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("request token", &self.endpoints.request_token)?;
		validate_endpoint("authorization", &self.endpoints.authorization)?;
		validate_endpoint("access token", &self.endpoints.access_token)?;

		if let Some((field, _)) = self.fields.named().into_iter().find(|(_, name)| name.is_empty())
		{
			return Err(ProviderDescriptorError::EmptyResponseField { field });
		}
		if self.quirks.refresh_window_fallback.is_some_and(|window| !window.is_positive()) {
			return Err(ProviderDescriptorError::NonPositiveRefreshWindow);
		}

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if url.scheme() != "https" {
		Err(ProviderDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
