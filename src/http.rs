//! Transport primitives for profile fetches.
//!
//! The module exposes [`ProfileHttpClient`], the strategy's only dependency on
//! an HTTP stack, plus the default reqwest-backed implementation. Transports
//! resolve with a raw [`ProfileResponse`] for any HTTP answer they receive and
//! reserve errors for failures where no response exists; status classification
//! stays with the strategy.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed single-shot future returned by [`ProfileHttpClient::get_with_bearer`].
pub type ProfileFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ProfileResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of a bearer-authenticated GET.
///
/// Implementations must be `Send + Sync + 'static` so one strategy instance can
/// serve concurrent login flows behind an `Arc` without additional wrappers.
/// Each call is independent: no retries, no caching, and no timeout beyond
/// whatever the transport enforces by default.
pub trait ProfileHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues a GET with `access_token` as bearer credential.
	///
	/// Resolves with `Ok` for every HTTP response that was actually received,
	/// whatever its status code; `Err` is reserved for transport failures where
	/// no response exists (DNS, TCP, TLS, IO).
	fn get_with_bearer<'a>(&'a self, url: &'a Url, access_token: &'a str) -> ProfileFuture<'a>;
}

/// Raw response handed back by a [`ProfileHttpClient`].
#[derive(Clone, Debug)]
pub struct ProfileResponse {
	/// HTTP status code returned by the profile endpoint.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}
impl ProfileResponse {
	/// Whether the status code falls in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. The strategy adds nothing on top of the client's defaults; configure
/// timeouts or proxies on the [`ReqwestClient`] before wrapping it.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestProfileClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestProfileClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestProfileClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestProfileClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProfileHttpClient for ReqwestProfileClient {
	fn get_with_bearer<'a>(&'a self, url: &'a Url, access_token: &'a str) -> ProfileFuture<'a> {
		Box::pin(async move {
			let response = self
				.0
				.get(url.clone())
				.bearer_auth(access_token)
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.text().await.map_err(TransportError::from)?;

			Ok(ProfileResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_range_covers_2xx_only() {
		let response = |status| ProfileResponse { status, body: String::new() };

		assert!(!response(199).is_success());
		assert!(response(200).is_success());
		assert!(response(204).is_success());
		assert!(response(299).is_success());
		assert!(!response(300).is_success());
		assert!(!response(500).is_success());
	}
}
