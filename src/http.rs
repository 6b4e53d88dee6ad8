//! Request interceptor: the only module coupled to an HTTP request abstraction.
//!
//! [`JwtInterceptor`] owns the integration seam described by
//! [`RequestSignerExt`](crate::ext::RequestSignerExt): it consumes an outbound request, issues a
//! token bound to that request's method and URL, and returns a new request whose authorization
//! header carries `JWT <token>`. The transformation is all-or-nothing; on any failure the
//! request is dropped and only the error is surfaced, so a partially signed request can never
//! reach the transport. Adapters for other client types implement the same trait downstream
//! without this crate depending on them.

// crates.io
use http::{HeaderValue, Request, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::Credentials,
	error::{MalformedRequestError, SigningError},
	ext::RequestSignerExt,
	jwt::{SignedToken, TokenIssuer},
	obs,
};

/// Attaches freshly issued `Authorization: JWT <token>` headers to outbound requests.
///
/// Stateless apart from the wrapped [`TokenIssuer`]; a single instance can be shared by
/// reference across threads.
#[derive(Clone, Debug, Default)]
pub struct JwtInterceptor {
	issuer: TokenIssuer,
}
impl JwtInterceptor {
	/// Creates an interceptor around a default one-day issuer.
	pub fn new() -> Self {
		Self { issuer: TokenIssuer::new() }
	}

	/// Creates an interceptor around a preconfigured issuer.
	pub fn with_issuer(issuer: TokenIssuer) -> Self {
		Self { issuer }
	}

	/// Signs an [`http::Request`], returning a new request that differs from the input only in
	/// its authorization header (any prior value is overwritten).
	pub fn attach_auth<B>(
		&self,
		request: Request<B>,
		credentials: &Credentials,
	) -> Result<Request<B>> {
		let _guard = obs::SignSpan::new("attach_auth").entered();
		let url = Url::parse(&request.uri().to_string())
			.map_err(|e| MalformedRequestError::Uri { source: e })?;
		let token = self.issuer.issue(credentials, request.method(), &url)?;
		let value = authorization_value(&token)?;
		let (mut parts, body) = request.into_parts();

		parts.headers.insert(AUTHORIZATION, value);

		Ok(Request::from_parts(parts, body))
	}
}
impl<B> RequestSignerExt<Request<B>, Error> for JwtInterceptor {
	fn attach_auth(&self, request: Request<B>, credentials: &Credentials) -> Result<Request<B>> {
		JwtInterceptor::attach_auth(self, request, credentials)
	}
}

/// Reqwest adapter for the same transformation.
///
/// [`reqwest::Request`] already exposes a parsed [`Url`], so no URI re-parsing is involved and
/// the only failure mode is signing itself.
#[cfg(feature = "reqwest")]
impl JwtInterceptor {
	/// Signs a [`reqwest::Request`], returning it with the authorization header set (any prior
	/// value is overwritten).
	pub fn attach_auth_reqwest(
		&self,
		mut request: reqwest::Request,
		credentials: &Credentials,
	) -> Result<reqwest::Request> {
		let _guard = obs::SignSpan::new("attach_auth").entered();
		let token = self.issuer.issue(credentials, request.method(), request.url())?;
		let value = authorization_value(&token)?;

		request.headers_mut().insert(AUTHORIZATION, value);

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl RequestSignerExt<reqwest::Request, Error> for JwtInterceptor {
	fn attach_auth(
		&self,
		request: reqwest::Request,
		credentials: &Credentials,
	) -> Result<reqwest::Request> {
		self.attach_auth_reqwest(request, credentials)
	}
}

fn authorization_value(token: &SignedToken) -> Result<HeaderValue, SigningError> {
	Ok(HeaderValue::from_str(&format!("JWT {}", token.expose()))?)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn credentials() -> Credentials {
		Credentials::new("my-addon", "s3cret")
	}

	fn request() -> Request<String> {
		Request::builder()
			.method(Method::GET)
			.uri("https://host/rest/api/2/issue?fields=summary&key=ABC-1")
			.header("accept", "application/json")
			.body("".to_owned())
			.expect("Test request fixture should build successfully.")
	}

	#[test]
	fn only_the_authorization_header_changes() {
		let signed = JwtInterceptor::new()
			.attach_auth(request(), &credentials())
			.expect("Signing a well-formed request should succeed.");
		let original = request();

		assert_eq!(signed.method(), original.method());
		assert_eq!(signed.uri(), original.uri());
		assert_eq!(signed.body(), original.body());
		assert_eq!(signed.headers().get("accept"), original.headers().get("accept"));
		assert_eq!(signed.headers().len(), original.headers().len() + 1);

		let value = signed
			.headers()
			.get(AUTHORIZATION)
			.expect("Signed request should carry an authorization header.")
			.to_str()
			.expect("Authorization header should be ASCII.");

		assert!(value.starts_with("JWT "));
	}

	#[test]
	fn prior_authorization_header_is_overwritten() {
		let stale = Request::builder()
			.method(Method::POST)
			.uri("https://host/path")
			.header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
			.body(())
			.expect("Test request fixture should build successfully.");
		let signed = JwtInterceptor::new()
			.attach_auth(stale, &credentials())
			.expect("Signing a well-formed request should succeed.");
		let values = signed.headers().get_all(AUTHORIZATION).iter().count();

		assert_eq!(values, 1);
		assert!(
			signed
				.headers()
				.get(AUTHORIZATION)
				.expect("Signed request should carry an authorization header.")
				.to_str()
				.expect("Authorization header should be ASCII.")
				.starts_with("JWT "),
		);
	}

	#[test]
	fn empty_secret_fails_without_returning_a_request() {
		let err = JwtInterceptor::new()
			.attach_auth(request(), &Credentials::new("my-addon", ""))
			.expect_err("Signing with an empty secret should fail.");

		assert!(matches!(err, Error::Signing(SigningError::EmptySecret)));
	}

	#[test]
	fn relative_uri_is_rejected_as_malformed() {
		let relative = Request::builder()
			.method(Method::GET)
			.uri("/rest/api/2/issue")
			.body(())
			.expect("Test request fixture should build successfully.");
		let err = JwtInterceptor::new()
			.attach_auth(relative, &credentials())
			.expect_err("Signing a relative URI should fail.");

		assert!(matches!(err, Error::MalformedRequest(MalformedRequestError::Uri { .. })));
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn reqwest_requests_are_signed_in_place_on_the_owned_copy() {
		let target = Url::parse("https://host/rest/api/2/issue?fields=summary")
			.expect("Test URL literal should parse.");
		let request = reqwest::Request::new(Method::GET, target);
		let signed = JwtInterceptor::new()
			.attach_auth_reqwest(request, &credentials())
			.expect("Signing a reqwest request should succeed.");

		assert!(
			signed
				.headers()
				.get(AUTHORIZATION)
				.expect("Signed request should carry an authorization header.")
				.to_str()
				.expect("Authorization header should be ASCII.")
				.starts_with("JWT "),
		);
	}
}
