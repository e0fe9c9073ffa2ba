//! Async client for requesting QuickBin bot API tokens: one multipart POST per email, typed
//! rate-limit and rejection errors, and optional tracing/metrics around every request.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod email;
pub mod error;
pub mod executor;
pub mod http;
pub mod obs;
pub mod request;

pub use email::EmailAddress;
pub use error::{ConfigError, Error, Result, TransportError};
pub use request::{
	DAILY_REQUEST_LIMIT, PendingTokenRequest, TOKEN_ENDPOINT, TokenRequester,
	TokenRequesterBuilder,
};

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use tokio::runtime::Handle;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
