//! Shared transports for integration tests.

#![allow(dead_code)]

// std
use std::{collections::VecDeque, sync::Arc};
// crates.io
use parking_lot::Mutex;
// self
use quickbin_token::{
	error::TransportError,
	http::{
		ReqwestHttpClient, TokenHttpClient, TokenHttpRequest, TokenHttpResponse, TransportFuture,
	},
	url::Url,
};

pub const EMAIL: &str = "bot@example.com";

/// Transport that records every request and answers with scripted responses in order.
#[derive(Clone, Default)]
pub struct RecordingHttpClient {
	requests: Arc<Mutex<Vec<TokenHttpRequest>>>,
	responses: Arc<Mutex<VecDeque<Result<TokenHttpResponse, TransportError>>>>,
	fallback: Option<TokenHttpResponse>,
}
impl RecordingHttpClient {
	/// Answers every request with `status` and `body`.
	pub fn always(status: u16, body: &str) -> Self {
		Self { fallback: Some(TokenHttpResponse::new(status, body)), ..Default::default() }
	}

	/// Answers the next request with `result`, before falling back to the default.
	pub fn then(self, result: Result<TokenHttpResponse, TransportError>) -> Self {
		self.responses.lock().push_back(result);

		self
	}

	pub fn recorded_requests(&self) -> Vec<TokenHttpRequest> {
		self.requests.lock().clone()
	}
}
impl TokenHttpClient for RecordingHttpClient {
	fn execute(&self, request: TokenHttpRequest) -> TransportFuture<'_> {
		self.requests.lock().push(request);

		let next = self.responses.lock().pop_front();
		let result = match next {
			Some(result) => result,
			None => Ok(self.fallback.clone().unwrap_or_default()),
		};

		Box::pin(async move { result })
	}
}

/// Reqwest transport that sends every request to a mock server instead of the fixed endpoint.
pub struct MockEndpointClient {
	target: Url,
	inner: ReqwestHttpClient,
}
impl MockEndpointClient {
	pub fn new(target: &str) -> Self {
		Self {
			target: Url::parse(target).expect("Mock endpoint URL should parse."),
			inner: ReqwestHttpClient::default(),
		}
	}
}
impl TokenHttpClient for MockEndpointClient {
	fn execute(&self, mut request: TokenHttpRequest) -> TransportFuture<'_> {
		request.url = self.target.clone();

		self.inner.execute(request)
	}
}
