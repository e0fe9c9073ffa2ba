//! Transport primitives for token requests.
//!
//! [`TokenHttpClient`] is the crate's only dependency on an HTTP stack. The default
//! [`ReqwestHttpClient`] covers production use; tests and embedders can plug in their own
//! implementation to capture or script the exchange.

// self
use crate::{
	_prelude::*,
	email::EmailAddress,
	error::{ConfigError, TransportError},
	request::TOKEN_ENDPOINT,
};

/// Multipart field name carrying the email address.
pub const EMAIL_FIELD: &str = "email";

/// Boxed future returned by [`TokenHttpClient::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TokenHttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of delivering a [`TokenHttpRequest`].
///
/// Implementations are shared behind an `Arc` by every task a requester spawns, so they must be
/// `Send + Sync + 'static` and must not rely on per-call mutable state. Timeouts, pooling, and TLS
/// are the implementation's business.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves to the raw status and body.
	fn execute(&self, request: TokenHttpRequest) -> TransportFuture<'_>;
}

/// HTTP method used for an outbound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `POST`.
	Post,
}
impl Method {
	/// Returns the method token as sent on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Body encoding for an outbound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormEncoding {
	/// `multipart/form-data`.
	Multipart,
}
impl FormEncoding {
	/// Returns the media type (without boundary parameter).
	pub const fn content_type(self) -> &'static str {
		match self {
			FormEncoding::Multipart => "multipart/form-data",
		}
	}
}

/// Single text part of a form body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
	/// Part name.
	pub name: String,
	/// Part value.
	pub value: String,
}
impl FormField {
	/// Creates a new text field.
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self { name: name.into(), value: value.into() }
	}
}

/// Transport-agnostic description of an outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenHttpRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute target URL.
	pub url: Url,
	/// Body encoding.
	pub encoding: FormEncoding,
	/// Form fields in send order.
	pub form: Vec<FormField>,
}
impl TokenHttpRequest {
	/// Builds the token request for `email`: a multipart `POST` to [`TOKEN_ENDPOINT`] with a single
	/// [`EMAIL_FIELD`] part.
	pub fn token(email: &EmailAddress) -> Result<Self> {
		let url = Url::parse(TOKEN_ENDPOINT)
			.map_err(|source| ConfigError::InvalidEndpoint { source })?;

		Ok(Self {
			method: Method::Post,
			url,
			encoding: FormEncoding::Multipart,
			form: vec![FormField::new(EMAIL_FIELD, email.as_str())],
		})
	}

	/// Returns the value of the first field named `name`.
	pub fn field(&self, name: &str) -> Option<&str> {
		self.form.iter().find(|field| field.name == name).map(|field| field.value.as_str())
	}
}

/// Raw response captured by a transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenHttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes; empty when the server sent none.
	pub body: Vec<u8>,
}
impl TokenHttpResponse {
	/// Creates a response from a status code and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` when the server sent a non-empty body.
	///
	/// Responses without a body are treated as successful whatever their status; see
	/// [`classify_response`](crate::request::classify_response).
	pub fn has_body(&self) -> bool {
		!self.body.is_empty()
	}

	/// Returns the body decoded as UTF-8, replacing invalid sequences.
	pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The wrapped client's default timeouts apply; configure a custom [`ReqwestClient`] through
/// [`ReqwestHttpClient::with_client`] to change them.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client with reqwest's defaults, reporting TLS backend failures instead of
	/// panicking like [`Default`] does.
	pub fn new() -> Result<Self, ConfigError> {
		Ok(Self(ReqwestClient::builder().build()?))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn send(&self, request: TokenHttpRequest) -> Result<TokenHttpResponse, TransportError> {
		let TokenHttpRequest { method, url, encoding, form } = request;
		let builder = match method {
			Method::Post => self.0.post(url),
		};
		let builder = match encoding {
			FormEncoding::Multipart => builder.multipart(
				form.into_iter().fold(reqwest::multipart::Form::new(), |parts, field| {
					parts.text(field.name, field.value)
				}),
			),
		};
		let response = builder.send().await?;
		let status = response.status().as_u16();
		let body = response.bytes().await?.to_vec();

		Ok(TokenHttpResponse { status, body })
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl std::ops::Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	fn execute(&self, request: TokenHttpRequest) -> TransportFuture<'_> {
		Box::pin(self.send(request))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_request_is_single_field_multipart_post() {
		let email = EmailAddress::new("bot@example.com").expect("Address fixture should be valid.");
		let request = TokenHttpRequest::token(&email).expect("Token request should build.");

		assert_eq!(request.method, Method::Post);
		assert_eq!(request.url.as_str(), "https://quickbin.pw/api/v2/bot/request/");
		assert_eq!(request.encoding.content_type(), "multipart/form-data");
		assert_eq!(request.form, vec![FormField::new("email", "bot@example.com")]);
		assert_eq!(request.field(EMAIL_FIELD), Some("bot@example.com"));
		assert_eq!(request.field("token"), None);
	}

	#[test]
	fn empty_body_is_not_a_body() {
		assert!(!TokenHttpResponse::new(302, Vec::new()).has_body());
		assert!(TokenHttpResponse::new(500, "{}").has_body());
		assert_eq!(TokenHttpResponse::new(400, "oops").body_text(), "oops");
	}
}
