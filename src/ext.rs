//! Public extension contracts for attaching OAuth 1.0a signatures to foreign HTTP clients.
//!
//! [`RequestSignerExt`] stays generic over the request type; the crate ships an
//! implementation for `reqwest::Request` behind the `reqwest` feature.

pub mod request_signer;

pub use request_signer::*;
