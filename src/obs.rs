//! Optional observability helpers for token issuance.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `connect_jwt.sign` with a `stage` field
//!   (`issue` or `attach_auth`).
//! - Enable `metrics` to increment the `connect_jwt_sign_total` counter for every
//!   attempt/success/failure, labeled by `outcome`.
//!
//! Neither backend ever receives the shared secret or an issued token; only non-sensitive
//! fields (stage, outcome) are recorded.

// self
use crate::_prelude::*;

/// Outcome labels recorded for each issuance attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignOutcome {
	/// Entry to an issuance helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl SignOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignOutcome::Attempt => "attempt",
			SignOutcome::Success => "success",
			SignOutcome::Failure => "failure",
		}
	}
}
impl Display for SignOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A span builder wrapping one synchronous signing stage.
#[derive(Clone, Debug)]
pub struct SignSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl SignSpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("connect_jwt.sign", stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self {}
		}
	}

	/// Enters the span for the duration of the returned guard.
	pub fn entered(self) -> SignSpanGuard {
		#[cfg(feature = "tracing")]
		{
			SignSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			SignSpanGuard {}
		}
	}
}

/// RAII guard returned by [`SignSpan::entered`].
pub struct SignSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for SignSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("SignSpanGuard(..)")
	}
}

/// Records an issuance outcome via the global metrics recorder (when enabled).
pub fn record_sign_outcome(outcome: SignOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("connect_jwt_sign_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
