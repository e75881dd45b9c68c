//! Provider-facing descriptors (data) and response parsers (behavior).
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering the three
//! HTTPS-only OAuth 1.0a endpoints, the signature method, the callback, the response
//! field table, and provider quirks. `parser` defines [`ResponseParser`], the one
//! polymorphic seam for providers whose token responses are not form-encoded.

pub mod descriptor;
pub mod parser;

pub use descriptor::*;
pub use parser::*;
