//! Query-string-hash (QSH) canonicalization.
//!
//! A QSH binds a token to one specific request: the method, path, and canonicalized query
//! parameters are folded into a single SHA-256 hex digest that the receiving service recomputes
//! and compares. The canonical form is `METHOD&PATH&PARAMS`, where `PARAMS` sorts parameter
//! names byte-wise, joins repeated values with `,` in their original order, and re-encodes every
//! name and value with the RFC 3986 unreserved set (space is `%20`, never `+`). Scheme, host,
//! and port are excluded so the same logical route hashes identically across deployments.
//!
//! Everything here is a pure function of its inputs; identical `(method, URL)` pairs always
//! produce identical output.

// std
use std::{collections::BTreeMap, fmt::Write};
// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

/// Query parameter name reserved for carrying a token in the query string.
///
/// This crate transports tokens in a header, but the parameter is still stripped before hashing
/// to stay compatible with peers that mix both transports.
pub const TOKEN_PARAM: &str = "jwt";

/// Characters escaped when re-encoding decoded parameter names and values.
///
/// Everything outside the RFC 3986 unreserved set (`ALPHA / DIGIT / "-" / "." / "_" / "~"`) is
/// percent-encoded, which yields `%20` for spaces.
const QUERY_ESCAPE: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Computes the QSH claim for a request: lowercase SHA-256 hex of the canonical string.
pub fn generate(method: &Method, url: &Url) -> String {
	let canonical = canonical_string(method, url);
	let digest = Sha256::digest(canonical.as_bytes());

	digest.iter().fold(String::with_capacity(64), |mut hex, byte| {
		let _ = write!(hex, "{byte:02x}");

		hex
	})
}

/// Builds the canonical `METHOD&PATH&PARAMS` string hashed by [`generate`].
///
/// Exposed so issued hashes can be verified against published canonicalization vectors; the
/// string itself is never persisted or sent on the wire.
pub fn canonical_string(method: &Method, url: &Url) -> String {
	// The path is taken in its parsed, still-encoded form; decoding it here would corrupt
	// routes that legitimately contain encoded reserved characters.
	let path = match url.path() {
		"" => "/",
		path => path,
	};

	format!("{}&{}&{}", method.as_str().to_uppercase(), path, canonical_query(url))
}

fn canonical_query(url: &Url) -> String {
	let mut grouped = BTreeMap::<String, Vec<String>>::new();

	for (name, value) in url.query_pairs() {
		if name == TOKEN_PARAM {
			continue;
		}

		grouped.entry(escape(&name)).or_default().push(escape(&value));
	}

	grouped
		.into_iter()
		.map(|(name, values)| format!("{name}={}", values.join(",")))
		.collect::<Vec<_>>()
		.join("&")
}

fn escape(raw: &str) -> String {
	utf8_percent_encode(raw, QUERY_ESCAPE).to_string()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(raw: &str) -> Url {
		Url::parse(raw).expect("Test URL literal should parse.")
	}

	#[test]
	fn canonical_string_sorts_parameters_by_name() {
		let canonical = canonical_string(
			&Method::GET,
			&url("https://host/rest/api/2/issue?key=ABC-1&fields=summary"),
		);

		assert_eq!(canonical, "GET&/rest/api/2/issue&fields=summary&key=ABC-1");
	}

	#[test]
	fn canonical_string_without_query_ends_in_ampersand() {
		let canonical = canonical_string(&Method::POST, &url("https://host/path"));

		assert_eq!(canonical, "POST&/path&");
	}

	#[test]
	fn repeated_parameters_keep_relative_value_order() {
		let canonical =
			canonical_string(&Method::GET, &url("https://host/search?tag=b&id=7&tag=a"));

		assert_eq!(canonical, "GET&/search&id=7&tag=b,a");
	}

	#[test]
	fn reserved_token_parameter_is_stripped() {
		let with_token = url("https://host/rest/api/2/issue?jwt=abc.def.ghi&fields=summary");
		let without_token = url("https://host/rest/api/2/issue?fields=summary");

		assert_eq!(
			generate(&Method::GET, &with_token),
			generate(&Method::GET, &without_token),
		);
	}

	#[test]
	fn spaces_reencode_as_percent_twenty() {
		// `+` and `%20` both decode to a space and must re-encode identically.
		let plus = canonical_string(&Method::GET, &url("https://host/x?a=1+2"));
		let encoded = canonical_string(&Method::GET, &url("https://host/x?a=1%202"));

		assert_eq!(plus, "GET&/x&a=1%202");
		assert_eq!(plus, encoded);
	}

	#[test]
	fn encoded_path_is_not_double_decoded() {
		let canonical = canonical_string(&Method::PUT, &url("https://host/pa%20th/sub?q=1"));

		assert_eq!(canonical, "PUT&/pa%20th/sub&q=1");
	}

	#[test]
	fn host_and_port_do_not_affect_the_hash() {
		let a = generate(&Method::GET, &url("https://one.example.com/route?x=1"));
		let b = generate(&Method::GET, &url("http://two.example.com:8080/route?x=1"));

		assert_eq!(a, b);
	}

	#[test]
	fn generate_is_deterministic() {
		let target = url("https://host/rest/api/2/issue?fields=summary&key=ABC-1");

		assert_eq!(generate(&Method::GET, &target), generate(&Method::GET, &target));
	}

	#[test]
	fn known_vectors() {
		assert_eq!(
			generate(&Method::GET, &url("https://host/rest/api/2/issue?fields=summary&key=ABC-1")),
			"ecf408913d3001a15acdf3f1852f0952130ad93c51db3c550f29d4b352e85d69",
		);
		assert_eq!(
			generate(&Method::POST, &url("https://host/path")),
			"2bdb1bb5952bc5408bc1e190bc1e39b1fbb4baf327b5c6aacf088a89a87891a0",
		);
	}
}
