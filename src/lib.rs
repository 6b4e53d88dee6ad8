//! Per-request Atlassian Connect JWTs—deterministic QSH canonicalization, HS256 claim signing,
//! and header injection for any HTTP client.
//!
//! The crate is consumed leaf-first: [`qsh`] canonicalizes a method + URL into the
//! query-string-hash claim, [`jwt`] assembles and signs the claim set, and [`http`] attaches the
//! resulting token to an outbound request as `Authorization: JWT <token>`. Everything is pure and
//! synchronous; the surrounding HTTP client owns the transport, retries, and configuration.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod ext;
pub mod http;
pub mod jwt;
pub mod obs;
pub mod qsh;

mod _prelude {
	pub use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

	pub use http::Method;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
