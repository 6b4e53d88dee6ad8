//! Credential model for Connect add-ons: issuer key, shared secret, optional subject.

// self
use crate::_prelude::*;

/// Redacted shared-secret wrapper keeping the signing key out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSecret(String);
impl SharedSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the secret holds no bytes and must be rejected by the issuer.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for SharedSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SharedSecret").field(&"<redacted>").finish()
	}
}
impl Display for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Per-call credentials used to issue a request token.
///
/// Supplied by the caller on every invocation and never persisted by this crate. The `key` is the
/// add-on's registered key and becomes the token's `iss` claim; `subject`, when present, becomes
/// the `sub` claim for user impersonation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// Registered add-on key, used as the token issuer.
	pub key: String,
	/// Shared secret keying the HMAC signature.
	pub secret: SharedSecret,
	/// Optional user identifier to impersonate.
	pub subject: Option<String>,
}
impl Credentials {
	/// Creates credentials for the given add-on key and shared secret, with no subject.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { key: key.into(), secret: SharedSecret::new(secret), subject: None }
	}

	/// Sets the user identifier carried as the `sub` claim.
	///
	/// An empty identifier is treated as absent so a blank configuration value never produces an
	/// empty `sub` claim.
	pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
		let subject = subject.into();

		self.subject = if subject.is_empty() { None } else { Some(subject) };

		self
	}
}
