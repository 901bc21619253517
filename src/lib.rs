//! OnyxAuth authentication strategy. Delegates user login to OnyxAuth over the
//! OAuth 2.0 authorization-code flow and normalizes the resulting user profile
//! for the hosting framework.
//!
//! The OAuth 2.0 handshake itself (redirects, state, token exchange) belongs to
//! the hosting framework's OAuth2 core; this crate supplies the OnyxAuth
//! endpoint configuration, the bearer-authenticated profile fetch with its
//! transport/parse error taxonomy, and the application verify-hook seam.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod profile;
pub mod strategy;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{StrategyConfig, StrategyConfigBuilder},
		http::ReqwestProfileClient,
		strategy::{OnyxAuthStrategy, VerifyCredentials},
	};

	/// Builds a configuration builder whose endpoints all point at a mock server base URL.
	pub fn test_config_builder(base: &Url) -> StrategyConfigBuilder {
		let join = |path| {
			base.join(path).expect("Mock endpoint path should join onto the base URL successfully.")
		};

		StrategyConfig::builder()
			.client_id("client-it")
			.client_secret("secret-it")
			.callback_url(join("/auth/onyxauth/callback"))
			.authorization_url(join("/oauth2/authorize"))
			.token_url(join("/oauth2/token"))
			.profile_url(join("/oauth2/users/profile"))
	}

	/// Constructs a reqwest-backed strategy pointed at a mock server.
	pub fn build_test_strategy<V>(
		base: &Url,
		verify: V,
	) -> OnyxAuthStrategy<V, ReqwestProfileClient>
	where
		V: VerifyCredentials,
	{
		let config = test_config_builder(base)
			.build()
			.expect("Test configuration should build successfully.");

		OnyxAuthStrategy::with_http_client(config, verify, ReqwestProfileClient::default())
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{BoxError, Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
