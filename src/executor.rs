//! Process-wide default worker pool for token requests.
//!
//! Callers that already run inside a tokio runtime should pass their own [`Handle`] through
//! [`TokenRequesterBuilder::executor`](crate::TokenRequesterBuilder::executor). Everyone else
//! shares a single multi-thread runtime that is started on first use and lives until the process
//! exits; it is never shut down explicitly.

// crates.io
use tokio::runtime::{Builder, Runtime};
// self
use crate::{_prelude::*, error::ConfigError};

const WORKER_THREAD_NAME: &str = "quickbin-token-worker";

static DEFAULT_RUNTIME: Mutex<Option<Arc<Runtime>>> = parking_lot::const_mutex(None);

/// Returns the shared default runtime, starting it on the first call.
///
/// Concurrent first calls are serialized so exactly one runtime is ever built.
pub fn default_runtime() -> Result<Arc<Runtime>, ConfigError> {
	let mut slot = DEFAULT_RUNTIME.lock();

	if let Some(runtime) = slot.as_ref() {
		return Ok(Arc::clone(runtime));
	}

	let runtime = Arc::new(
		Builder::new_multi_thread()
			.thread_name(WORKER_THREAD_NAME)
			.enable_all()
			.build()
			.map_err(|source| ConfigError::ExecutorBuild { source })?,
	);

	#[cfg(feature = "tracing")]
	tracing::debug!(thread_name = WORKER_THREAD_NAME, "Started default token request runtime.");

	*slot = Some(Arc::clone(&runtime));

	Ok(runtime)
}

/// Returns a spawn handle onto the shared default runtime.
pub fn default_executor() -> Result<Handle, ConfigError> {
	Ok(default_runtime()?.handle().clone())
}
