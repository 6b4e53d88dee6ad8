//! Crate-level error types shared across the canonicalizer, issuer, and interceptor.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
///
/// Nothing in this crate is recoverable internally: every failure is surfaced synchronously to
/// the caller, which owns any retry decision. Messages never carry the shared secret or an
/// issued token.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The outbound request could not be canonicalized.
	#[error(transparent)]
	MalformedRequest(#[from] MalformedRequestError),
	/// The claim set could not be signed.
	#[error(transparent)]
	Signing(#[from] SigningError),
}

/// Failures raised while decomposing a request into path/query components.
#[derive(Debug, ThisError)]
pub enum MalformedRequestError {
	/// Request URI is not an absolute URL the canonicalizer can consume.
	#[error("Request URI cannot be parsed into an absolute URL.")]
	Uri {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Failures raised while signing the claim set or encoding the credential.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Shared secret is empty; rejected before the signing primitive runs.
	#[error("Shared secret must not be empty.")]
	EmptySecret,
	/// Signing primitive rejected the claim set or key.
	#[error("Claim set could not be signed.")]
	Encode {
		/// Underlying JWT encoding failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Issued token cannot be represented as an HTTP header value.
	#[error("Signed token cannot be encoded as a header value.")]
	HeaderValue {
		/// Underlying header construction failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
}
impl From<jsonwebtoken::errors::Error> for SigningError {
	fn from(e: jsonwebtoken::errors::Error) -> Self {
		Self::Encode { source: e }
	}
}
impl From<http::header::InvalidHeaderValue> for SigningError {
	fn from(e: http::header::InvalidHeaderValue) -> Self {
		Self::HeaderValue { source: e }
	}
}
