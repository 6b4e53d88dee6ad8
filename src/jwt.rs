//! Claim-set assembly and HS256 signing for per-request Connect tokens.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{_prelude::*, auth::Credentials, error::SigningError, obs, qsh};

/// Claim set embedded in every issued token.
///
/// `sub` is present exactly when the credentials carried a subject; all other claims are
/// required. Invariant: `exp > iat`, with `exp - iat` equal to the issuer's validity window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
	/// Registered add-on key of the caller.
	pub iss: String,
	/// Issued-at instant, epoch seconds.
	pub iat: i64,
	/// Expiry instant, epoch seconds.
	pub exp: i64,
	/// Query-string hash binding the token to one request.
	pub qsh: String,
	/// Impersonated user identifier, when one was supplied.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sub: Option<String>,
}

/// Compact signed token: three base64url (no padding) segments joined by `.`.
///
/// Created once per request and attached immediately; tokens are never reused because the QSH
/// claim is request-specific. `Debug` and `Display` redact the value so it cannot leak through
/// logging.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedToken(String);
impl SignedToken {
	/// Returns the compact serialized token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for SignedToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SignedToken").field(&"<redacted>").finish()
	}
}
impl Display for SignedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Stateless token issuer.
///
/// Holds only the validity window, so a single instance can be shared by reference across
/// threads; every call receives its own immutable inputs and produces a fresh token.
#[derive(Clone, Debug)]
pub struct TokenIssuer {
	validity: Duration,
}
impl TokenIssuer {
	/// Default validity window applied by [`TokenIssuer::new`]: one day, matching what Connect
	/// services expect from add-on request tokens.
	pub const DEFAULT_VALIDITY: Duration = Duration::days(1);

	/// Creates an issuer with the default one-day validity window.
	pub fn new() -> Self {
		Self { validity: Self::DEFAULT_VALIDITY }
	}

	/// Overrides the validity window.
	///
	/// Windows shorter than one second are clamped to one second; JWT timing claims are whole
	/// epoch seconds and `exp` must stay strictly greater than `iat`.
	pub fn with_validity(mut self, validity: Duration) -> Self {
		self.validity =
			if validity < Duration::SECOND { Duration::SECOND } else { validity };

		self
	}

	/// Returns the configured validity window.
	pub fn validity(&self) -> Duration {
		self.validity
	}

	/// Issues a token for the given request, reading the wall clock once for `iat`.
	pub fn issue(
		&self,
		credentials: &Credentials,
		method: &Method,
		url: &Url,
	) -> Result<SignedToken, SigningError> {
		self.issue_at(credentials, method, url, OffsetDateTime::now_utc())
	}

	/// Issues a token with an explicit issued-at instant.
	///
	/// Used by tests and callers with injected clocks; `issue` delegates here with the current
	/// UTC instant.
	pub fn issue_at(
		&self,
		credentials: &Credentials,
		method: &Method,
		url: &Url,
		now: OffsetDateTime,
	) -> Result<SignedToken, SigningError> {
		let _guard = obs::SignSpan::new("issue").entered();

		obs::record_sign_outcome(obs::SignOutcome::Attempt);

		let result = self.sign(credentials, method, url, now);

		obs::record_sign_outcome(match &result {
			Ok(_) => obs::SignOutcome::Success,
			Err(_) => obs::SignOutcome::Failure,
		});

		result
	}

	fn sign(
		&self,
		credentials: &Credentials,
		method: &Method,
		url: &Url,
		now: OffsetDateTime,
	) -> Result<SignedToken, SigningError> {
		if credentials.secret.is_empty() {
			return Err(SigningError::EmptySecret);
		}

		let iat = now.unix_timestamp();
		let claims = Claims {
			iss: credentials.key.clone(),
			iat,
			exp: iat + self.validity.whole_seconds(),
			qsh: qsh::generate(method, url),
			// An empty subject never becomes an empty `sub` claim.
			sub: credentials.subject.clone().filter(|subject| !subject.is_empty()),
		};
		let key = EncodingKey::from_secret(credentials.secret.expose().as_bytes());
		let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)?;

		Ok(SignedToken(token))
	}
}
impl Default for TokenIssuer {
	fn default() -> Self {
		Self::new()
	}
}
