//! Strategy-level error types shared across configuration, transport, and profile handling.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used at the verify-hook boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] crate::config::StrategyConfigError),
	/// Transport failure while fetching the user profile.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Profile endpoint returned a body that is not valid JSON.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// Profile payload failed strict field validation.
	#[error(transparent)]
	Profile(#[from] ProfileError),

	/// Endpoint URL could not be converted for the OAuth2 client wiring.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Application verify hook reported a failure.
	#[error("Verify hook failed.")]
	Verify {
		/// Application-supplied failure.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Wraps an application verify-hook failure.
	pub fn verify(src: impl Into<BoxError>) -> Self {
		Self::Verify { source: src.into() }
	}
}

/// Transport-level failures (network, IO, non-success statuses).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the profile endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Profile endpoint answered with a non-success HTTP status.
	#[error("Profile endpoint returned HTTP {status}.")]
	Status {
		/// HTTP status code returned by the profile endpoint.
		status: u16,
		/// Response body, when one was received.
		body: Option<String>,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the profile endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Decoding failures for the profile endpoint's response body.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// Profile endpoint responded with malformed JSON.
	#[error("Profile endpoint returned malformed JSON.")]
	Json {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// Offending response body, retained for diagnostics.
		body: String,
	},
}

/// Strict-policy validation failures for normalized profiles.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProfileError {
	/// Payload lacks a field required under [`MissingFieldPolicy::Strict`].
	///
	/// [`MissingFieldPolicy::Strict`]: crate::config::MissingFieldPolicy::Strict
	#[error("Profile payload is missing the `{field}` field.")]
	MissingField {
		/// Dotted path of the absent field (e.g. `profile.id`).
		field: &'static str,
	},
}
