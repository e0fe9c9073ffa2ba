//! Requests a QuickBin bot token for the address given on the command line.
//!
//! ```sh
//! cargo run --example request_token -- you@example.com
//! ```

// std
use std::sync::Arc;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use quickbin_token::{DAILY_REQUEST_LIMIT, Error, TokenRequester, http::ReqwestHttpClient};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let email = std::env::args().nth(1).ok_or_else(|| eyre!("Usage: request_token <email>"))?;
	let requester = TokenRequester::builder(email)
		.http_client(Arc::new(ReqwestHttpClient::new()?))
		.executor(tokio::runtime::Handle::current())
		.build()?;

	match requester.request_token().await {
		Ok(()) => println!("Token sent to {}.", requester.email()),
		Err(Error::RateLimited) =>
			println!("Rate limited; QuickBin allows {DAILY_REQUEST_LIMIT} requests per day."),
		Err(Error::InvalidRequest { reason, .. }) => println!("Request rejected: {reason}"),
		Err(e) => return Err(e.into()),
	}

	Ok(())
}
