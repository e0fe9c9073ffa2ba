mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use tokio::runtime::Handle;
// self
use common::{EMAIL, MockEndpointClient};
use quickbin_token::{Error, TokenRequester};

const TOKEN_PATH: &str = "/api/v2/bot/request/";

fn build_requester(server: &MockServer) -> TokenRequester<MockEndpointClient> {
	TokenRequester::builder(EMAIL)
		.http_client(Arc::new(MockEndpointClient::new(&server.url(TOKEN_PATH))))
		.executor(Handle::current())
		.build()
		.expect("Requester should build for a valid email.")
}

#[tokio::test]
async fn token_request_posts_multipart_form() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH).header_exists("content-type");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"response\":\"Token sent.\"}");
		})
		.await;
	let requester = build_requester(&server);

	requester.request_token().await.expect("Token request should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn rate_limited_response_maps_to_rate_limit() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(429).body("Too Many Requests");
		})
		.await;
	let requester = build_requester(&server);
	let err = requester.request_token().await.expect_err("HTTP 429 should fail.");

	assert!(matches!(err, Error::RateLimited));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn rejected_response_carries_reason() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"response\":\"Invalid email address.\"}");
		})
		.await;
	let requester = build_requester(&server);
	let err = requester.request_token().await.expect_err("HTTP 400 should fail.");

	match err {
		Error::InvalidRequest { status, reason } => {
			assert_eq!(status, 400);
			assert_eq!(reason, "Invalid email address.");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_async().await;
}

#[tokio::test]
async fn empty_error_response_is_treated_as_success() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(302);
		})
		.await;
	let requester = build_requester(&server);

	requester.request_token().await.expect("Responses without a body should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
	let requester = TokenRequester::builder(EMAIL)
		.http_client(Arc::new(MockEndpointClient::new("http://127.0.0.1:9/api/v2/bot/request/")))
		.executor(Handle::current())
		.build()
		.expect("Requester should build for a valid email.");
	let err = requester.request_token().await.expect_err("Closed ports should fail to connect.");

	assert!(matches!(err, Error::Transport(_)));
	assert!(err.is_retryable());
}
