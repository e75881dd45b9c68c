//! Signature base string construction (RFC 5849 §3.4.1).

// std
use std::collections::BTreeSet;
// self
use crate::{_prelude::*, signature::encode::percent_encode};

/// Name of the parameter that carries the signature; never part of the signed set.
pub const OAUTH_SIGNATURE: &str = "oauth_signature";

/// Returns the base string URI: lower-cased scheme and host, non-default port, and path,
/// without query or fragment.
pub fn base_string_uri(uri: &Url) -> String {
	let mut base = uri.clone();

	base.set_query(None);
	base.set_fragment(None);

	base.to_string()
}

/// Encodes, de-duplicates, and sorts the parameter set, then joins it as `k=v&k=v`.
///
/// Pairs are compared on their encoded form, first by key and then by value. Identical
/// key/value pairs collapse into one entry; repeated keys with distinct values are kept.
pub fn normalize_parameters<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let encoded = pairs
		.into_iter()
		.filter(|(key, _)| *key != OAUTH_SIGNATURE)
		.map(|(key, value)| (percent_encode(key), percent_encode(value)))
		.collect::<BTreeSet<_>>();
	let mut buf = String::new();

	for (idx, (key, value)) in encoded.iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.push_str(key);
		buf.push('=');
		buf.push_str(value);
	}

	buf
}

/// Builds the full base string for `method` + `uri`, merging the URI's query parameters
/// with `params` (protocol and body parameters).
pub fn signature_base_string(method: &str, uri: &Url, params: &[(String, String)]) -> String {
	let query = uri.query_pairs().into_owned().collect::<Vec<_>>();
	let normalized = normalize_parameters(
		query
			.iter()
			.chain(params.iter())
			.map(|(key, value)| (key.as_str(), value.as_str())),
	);

	format!(
		"{}&{}&{}",
		percent_encode(&method.to_ascii_uppercase()),
		percent_encode(&base_string_uri(uri)),
		percent_encode(&normalized)
	)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Test URL should parse.")
	}

	#[test]
	fn base_uri_drops_query_fragment_and_default_port() {
		assert_eq!(
			base_string_uri(&url("HTTP://Example.COM:80/r%20v/X?id=123#frag")),
			"http://example.com/r%20v/X"
		);
		assert_eq!(
			base_string_uri(&url("https://www.example.net:8080/?q=1")),
			"https://www.example.net:8080/"
		);
		assert_eq!(base_string_uri(&url("https://example.com:443")), "https://example.com/");
	}

	#[test]
	fn parameters_sort_by_encoded_key_then_value_and_keep_distinct_duplicates() {
		let normalized = normalize_parameters([
			("b5", "=%3D"),
			("a3", "a"),
			("c@", ""),
			("a2", "r b"),
			("oauth_signature", "ignored"),
			("c2", ""),
			("a3", "2 q"),
			("a3", "a"),
		]);

		assert_eq!(normalized, "a2=r%20b&a3=2%20q&a3=a&b5=%3D%253D&c%40=&c2=");
	}

	#[test]
	fn base_string_matches_oauth_core_example() {
		let uri = url("http://photos.example.net/photos?file=vacation.jpg&size=original");
		let params = [
			("oauth_consumer_key", "dpf43f3p2l4k3l03"),
			("oauth_token", "nnch734d00sl2jdk"),
			("oauth_signature_method", "HMAC-SHA1"),
			("oauth_timestamp", "1191242096"),
			("oauth_nonce", "kllo9940pd9333jh"),
			("oauth_version", "1.0"),
		]
		.map(|(key, value)| (key.to_owned(), value.to_owned()));

		assert_eq!(
			signature_base_string("get", &uri, &params),
			"GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal"
		);
	}
}
