//! OAuth 1.0a token values: the immutable [`record::Token`], its lifetime, and redacted secrets.

/// Access-token end-of-life states.
pub mod lifetime;
pub mod record;
pub mod secret;
