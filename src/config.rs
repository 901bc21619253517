//! Strategy configuration: client credentials, OnyxAuth endpoints, and the
//! missing-field policy, assembled through a fallible builder.

// self
use crate::_prelude::*;

/// Default OnyxAuth authorization endpoint.
pub const DEFAULT_AUTHORIZATION_URL: &str = "https://onyxauth.com/oauth2/authorize";
/// Default OnyxAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://onyxauth.com/oauth2/token";
/// Default OnyxAuth profile endpoint.
pub const DEFAULT_PROFILE_URL: &str = "https://onyxauth.com/oauth2/users/profile";

/// Errors raised while constructing a [`StrategyConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StrategyConfigError {
	/// Client identifier is mandatory.
	#[error("Missing OAuth 2.0 client identifier.")]
	MissingClientId,
	/// Client secret is mandatory.
	#[error("Missing OAuth 2.0 client secret.")]
	MissingClientSecret,
	/// Callback URL is mandatory.
	#[error("Missing callback URL.")]
	MissingCallbackUrl,
}

/// Controls how profile normalization treats absent payload fields.
///
/// OnyxAuth's profile contract is lax: responses may omit the nested `profile`
/// object or any of its sub-fields, and the provider treats that as a valid
/// answer. The lenient default mirrors that contract; strict mode is an
/// explicit opt-in for applications that cannot tolerate partial profiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
	#[default]
	/// Absent fields normalize to `None`/empty.
	Lenient,
	/// Absent `profile.id` or `profile.displayName` fail the fetch.
	Strict,
}

/// Immutable configuration owned by the strategy.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
	/// OAuth 2.0 client identifier issued by OnyxAuth.
	pub client_id: String,
	/// OAuth 2.0 client secret issued by OnyxAuth.
	pub client_secret: String,
	/// Absolute URL OnyxAuth redirects back to after granting authorization.
	pub callback_url: Url,
	/// Authorization endpoint; defaults to [`DEFAULT_AUTHORIZATION_URL`].
	pub authorization_url: Url,
	/// Token endpoint; defaults to [`DEFAULT_TOKEN_URL`].
	pub token_url: Url,
	/// Profile endpoint; defaults to [`DEFAULT_PROFILE_URL`].
	pub profile_url: Url,
	/// Missing-field policy applied during profile normalization.
	pub missing_field_policy: MissingFieldPolicy,
}
impl StrategyConfig {
	/// Creates a new builder.
	pub fn builder() -> StrategyConfigBuilder {
		StrategyConfigBuilder::default()
	}
}
impl Debug for StrategyConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyConfig")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("callback_url", &self.callback_url)
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("profile_url", &self.profile_url)
			.field("missing_field_policy", &self.missing_field_policy)
			.finish()
	}
}

/// Builder for [`StrategyConfig`] values.
///
/// `client_id`, `client_secret`, and `callback_url` are mandatory; the three
/// endpoint URLs fall back to the fixed OnyxAuth defaults when omitted.
#[derive(Default)]
pub struct StrategyConfigBuilder {
	client_id: Option<String>,
	client_secret: Option<String>,
	callback_url: Option<Url>,
	authorization_url: Option<Url>,
	token_url: Option<Url>,
	profile_url: Option<Url>,
	missing_field_policy: MissingFieldPolicy,
}
impl StrategyConfigBuilder {
	/// Sets the OAuth 2.0 client identifier.
	pub fn client_id(mut self, value: impl Into<String>) -> Self {
		self.client_id = Some(value.into());

		self
	}

	/// Sets the OAuth 2.0 client secret.
	pub fn client_secret(mut self, value: impl Into<String>) -> Self {
		self.client_secret = Some(value.into());

		self
	}

	/// Sets the callback URL OnyxAuth redirects back to.
	pub fn callback_url(mut self, url: Url) -> Self {
		self.callback_url = Some(url);

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, url: Url) -> Self {
		self.authorization_url = Some(url);

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Overrides the profile endpoint.
	pub fn profile_url(mut self, url: Url) -> Self {
		self.profile_url = Some(url);

		self
	}

	/// Overrides the missing-field policy (defaults to lenient).
	pub fn missing_field_policy(mut self, policy: MissingFieldPolicy) -> Self {
		self.missing_field_policy = policy;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<StrategyConfig, StrategyConfigError> {
		let client_id = self
			.client_id
			.filter(|value| !value.trim().is_empty())
			.ok_or(StrategyConfigError::MissingClientId)?;
		let client_secret = self
			.client_secret
			.filter(|value| !value.trim().is_empty())
			.ok_or(StrategyConfigError::MissingClientSecret)?;
		let callback_url = self.callback_url.ok_or(StrategyConfigError::MissingCallbackUrl)?;

		Ok(StrategyConfig {
			client_id,
			client_secret,
			callback_url,
			authorization_url: self
				.authorization_url
				.unwrap_or_else(|| default_url(DEFAULT_AUTHORIZATION_URL)),
			token_url: self.token_url.unwrap_or_else(|| default_url(DEFAULT_TOKEN_URL)),
			profile_url: self.profile_url.unwrap_or_else(|| default_url(DEFAULT_PROFILE_URL)),
			missing_field_policy: self.missing_field_policy,
		})
	}
}

fn default_url(value: &str) -> Url {
	// The defaults are compile-time constants.
	Url::parse(value).expect("Default endpoint constant should parse successfully.")
}
