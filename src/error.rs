//! Error types surfaced by token requests.

// self
use crate::{_prelude::*, request::DAILY_REQUEST_LIMIT};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// Every failure of a spawned token request resolves to exactly one of these variants, so callers
/// can match on the cause without unwrapping nested errors.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The request task panicked or its runtime shut down before it finished.
	#[error("Token request task did not complete.")]
	Executor(#[from] tokio::task::JoinError),

	/// Server answered HTTP 429.
	#[error("Too many token requests; the limit is {} per day.", DAILY_REQUEST_LIMIT)]
	RateLimited,
	/// Server rejected the request and explained why.
	#[error("Token request was rejected (HTTP {status}): {reason}.")]
	InvalidRequest {
		/// HTTP status code returned by the endpoint.
		status: u16,
		/// Server-supplied reason string.
		reason: String,
	},
	/// Error response body was not the expected JSON document.
	#[error("Token endpoint returned a malformed error body (HTTP {status}).")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code returned by the endpoint.
		status: u16,
	},
}
impl Error {
	/// Returns `true` when repeating the same request later may succeed.
	///
	/// The crate never retries on its own; this only helps callers build a policy.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::RateLimited | Self::Transport(_))
	}
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Email address was empty.
	#[error(
		"The email address cannot be empty; the token is delivered to it and has nowhere else to go."
	)]
	InvalidEmail,
	/// Token endpoint constant could not be parsed.
	#[error("Token endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Default worker pool could not be started.
	#[error("Default token request runtime could not be started.")]
	ExecutorBuild {
		/// Underlying runtime builder failure.
		#[source]
		source: std::io::Error,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
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
