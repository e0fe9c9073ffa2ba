//! Optional observability helpers for token requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run every request task inside a span named `quickbin.token_request`
//!   with a `stage` field, and to log each classified outcome.
//! - Enable `metrics` to increment the `quickbin_token_request_total` counter for every
//!   attempt and outcome, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each token request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// A request task was spawned.
	Attempt,
	/// The endpoint accepted the request.
	Success,
	/// The endpoint answered HTTP 429.
	RateLimited,
	/// The endpoint rejected the request with a reason.
	Rejected,
	/// Transport, parsing, or executor failure.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::RateLimited => "rate_limited",
			RequestOutcome::Rejected => "rejected",
			RequestOutcome::Failure => "failure",
		}
	}

	/// Maps a finished request to its outcome label.
	pub fn of(result: &Result<()>) -> Self {
		match result {
			Ok(()) => RequestOutcome::Success,
			Err(Error::RateLimited) => RequestOutcome::RateLimited,
			Err(Error::InvalidRequest { .. }) => RequestOutcome::Rejected,
			Err(_) => RequestOutcome::Failure,
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
