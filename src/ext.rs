//! Public extension contract for attaching request tokens to arbitrary HTTP clients.

// self
use crate::auth::Credentials;

/// Describes how to attach a freshly issued request token to an outbound request without
/// constraining the HTTP client type.
///
/// The trait is intentionally generic over both the request and error types so implementers can
/// integrate with any client builder (`reqwest`, `surf`, a bespoke SDK, etc.) while keeping
/// `connect-jwt` free of those dependencies. [`JwtInterceptor`](crate::http::JwtInterceptor)
/// implements it for `http::Request<B>` and, behind the `reqwest` feature, `reqwest::Request`.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and returns a copy with authorization state derived from
	/// `credentials`; on failure the request is dropped and only the error is returned.
	fn attach_auth(&self, request: Request, credentials: &Credentials) -> Result<Request, Error>;
}
