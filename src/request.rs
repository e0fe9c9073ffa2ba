//! Token request orchestration.
//!
//! [`TokenRequester`] holds one validated email address, a shared transport, and the executor
//! its request tasks run on. Each [`TokenRequester::request_token`] call spawns exactly one task
//! and hands back a [`PendingTokenRequest`] without waiting on the network. The task is already
//! running when the handle is returned; awaiting the handle only observes its result, and dropping
//! it detaches the task rather than cancelling it.

// std
use std::task::{Context, Poll};
// crates.io
use tokio::task::JoinHandle;
// self
use crate::{
	_prelude::*,
	email::EmailAddress,
	executor,
	http::{TokenHttpClient, TokenHttpRequest, TokenHttpResponse},
	obs::{self, RequestOutcome, RequestSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Fixed token-issuance endpoint.
pub const TOKEN_ENDPOINT: &str = "https://quickbin.pw/api/v2/bot/request/";
/// Number of token requests the service accepts per caller per day before answering HTTP 429.
pub const DAILY_REQUEST_LIMIT: u32 = 1_000;
/// JSON field holding the rejection reason in non-200 responses.
pub const RESPONSE_REASON_FIELD: &str = "response";

const STATUS_OK: u16 = 200;
const STATUS_TOO_MANY_REQUESTS: u16 = 429;

#[cfg(feature = "reqwest")]
/// Requester specialized for the crate's default reqwest transport.
pub type ReqwestTokenRequester = TokenRequester<ReqwestHttpClient>;

/// Requests QuickBin API tokens for a single email address.
///
/// Instances are immutable after construction and cheap to clone; clones share the transport
/// and executor.
pub struct TokenRequester<C>
where
	C: ?Sized + TokenHttpClient,
{
	email: EmailAddress,
	http_client: Arc<C>,
	executor: Handle,
}
impl<C> TokenRequester<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Returns the address tokens are requested for.
	pub fn email(&self) -> &EmailAddress {
		&self.email
	}

	/// Returns the executor request tasks are spawned on.
	pub fn executor(&self) -> &Handle {
		&self.executor
	}

	/// Returns the shared transport.
	pub fn http_client(&self) -> &Arc<C> {
		&self.http_client
	}

	/// Spawns one token request and returns its handle immediately.
	///
	/// The task posts the email to [`TOKEN_ENDPOINT`] and resolves through
	/// [`classify_response`]. Failures surface only through the returned handle; nothing is
	/// retried.
	pub fn request_token(&self) -> PendingTokenRequest {
		let span = RequestSpan::new("request_token");
		let email = self.email.clone();
		let http_client = Arc::clone(&self.http_client);

		obs::record_request_outcome(RequestOutcome::Attempt);

		let task = span.instrument(async move {
			let result = send_token_request(http_client.as_ref(), &email).await;

			obs::log_request_outcome(&result);
			obs::record_request_outcome(RequestOutcome::of(&result));

			result
		});

		PendingTokenRequest { task: self.executor.spawn(task) }
	}
}
#[cfg(feature = "reqwest")]
impl TokenRequester<ReqwestHttpClient> {
	/// Creates a requester backed by reqwest and the shared default executor.
	///
	/// Fails with [`ConfigError::InvalidEmail`](crate::ConfigError::InvalidEmail) when `email` is
	/// empty. The default executor is started on first use and reused afterwards.
	pub fn new(email: impl Into<String>) -> Result<Self> {
		Self::builder(email).build()
	}

	/// Creates a requester backed by reqwest that spawns onto `executor`.
	pub fn with_executor(email: impl Into<String>, executor: Handle) -> Result<Self> {
		Self::builder(email).executor(executor).build()
	}

	/// Starts a builder preloaded with the default reqwest transport.
	pub fn builder(email: impl Into<String>) -> TokenRequesterBuilder<ReqwestHttpClient> {
		TokenRequesterBuilder::new(email, Arc::new(ReqwestHttpClient::default()))
	}
}
impl<C> Clone for TokenRequester<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			email: self.email.clone(),
			http_client: Arc::clone(&self.http_client),
			executor: self.executor.clone(),
		}
	}
}
impl<C> Debug for TokenRequester<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRequester")
			.field("email", &self.email)
			.field("endpoint", &TOKEN_ENDPOINT)
			.finish()
	}
}

/// Builder for [`TokenRequester`].
pub struct TokenRequesterBuilder<C>
where
	C: ?Sized + TokenHttpClient,
{
	email: String,
	http_client: Arc<C>,
	executor: Option<Handle>,
}
impl<C> TokenRequesterBuilder<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a builder for `email` using the provided transport.
	pub fn new(email: impl Into<String>, http_client: Arc<C>) -> Self {
		Self { email: email.into(), http_client, executor: None }
	}

	/// Spawns request tasks onto `executor` instead of the shared default runtime.
	pub fn executor(mut self, executor: Handle) -> Self {
		self.executor = Some(executor);

		self
	}

	/// Replaces the transport.
	pub fn http_client<D>(self, http_client: Arc<D>) -> TokenRequesterBuilder<D>
	where
		D: ?Sized + TokenHttpClient,
	{
		TokenRequesterBuilder { email: self.email, http_client, executor: self.executor }
	}

	/// Validates the email and resolves the executor.
	///
	/// The email is checked first, so an invalid address never starts the default runtime.
	pub fn build(self) -> Result<TokenRequester<C>> {
		let email = EmailAddress::new(&self.email)?;
		let executor = match self.executor {
			Some(handle) => handle,
			None => executor::default_executor()?,
		};

		Ok(TokenRequester { email, http_client: self.http_client, executor })
	}
}
impl<C> Debug for TokenRequesterBuilder<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRequesterBuilder")
			.field("email", &self.email)
			.field("executor_set", &self.executor.is_some())
			.finish()
	}
}

/// Handle to a spawned token request.
///
/// Resolves to `Ok(())` once the endpoint accepts the request. A task that panics or whose runtime
/// shuts down resolves to [`Error::Executor`].
#[must_use = "the request runs regardless; await the handle to observe its outcome"]
#[derive(Debug)]
pub struct PendingTokenRequest {
	task: JoinHandle<Result<()>>,
}
impl PendingTokenRequest {
	/// Returns `true` once the request task has finished.
	pub fn is_finished(&self) -> bool {
		self.task.is_finished()
	}
}
impl Future for PendingTokenRequest {
	type Output = Result<()>;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		Pin::new(&mut self.task).poll(cx).map(|joined| match joined {
			Ok(result) => result,
			Err(e) => Err(Error::Executor(e)),
		})
	}
}

#[derive(Deserialize)]
struct RejectionBody {
	response: String,
}

/// Classifies a token endpoint response.
///
/// - No body: success, whatever the status. Kept for compatibility with the service's historic
///   client even though an empty non-200 response is unlikely to mean success.
/// - HTTP 200: success.
/// - HTTP 429: [`Error::RateLimited`].
/// - Anything else: the body must be `{"response": "<reason>"}` and yields
///   [`Error::InvalidRequest`]; any other body yields [`Error::ResponseParse`].
pub fn classify_response(response: &TokenHttpResponse) -> Result<()> {
	let status = response.status;

	if !response.has_body() || status == STATUS_OK {
		return Ok(());
	}
	if status == STATUS_TOO_MANY_REQUESTS {
		return Err(Error::RateLimited);
	}

	let mut de = serde_json::Deserializer::from_slice(&response.body);
	let body: RejectionBody = serde_path_to_error::deserialize(&mut de)
		.map_err(|source| Error::ResponseParse { source, status })?;

	Err(Error::InvalidRequest { status, reason: body.response })
}

async fn send_token_request<C>(http_client: &C, email: &EmailAddress) -> Result<()>
where
	C: ?Sized + TokenHttpClient,
{
	let request = TokenHttpRequest::token(email)?;
	let response = http_client.execute(request).await?;

	classify_response(&response)
}
