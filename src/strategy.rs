//! The OnyxAuth strategy: endpoint wiring for an OAuth2 core, the profile
//! fetch, and the application verify hook.
//!
//! The strategy does not run the OAuth 2.0 handshake itself. A hosting
//! framework's OAuth2 core drives the redirect/callback/token-exchange
//! protocol — [`OnyxAuthStrategy::oauth2_client`] hands it a preconfigured
//! [`oauth2`] client — and once an access token exists the core calls back
//! into [`OnyxAuthStrategy::user_profile`] or [`OnyxAuthStrategy::authenticate`].

pub use oauth2;

// crates.io
use oauth2::{
	AuthUrl, ClientId, ClientSecret, EndpointNotSet, EndpointSet, RedirectUrl, TokenUrl,
	basic::BasicClient,
};
// self
use crate::{
	_prelude::*,
	config::StrategyConfig,
	error::TransportError,
	http::ProfileHttpClient,
	obs::FetchSpan,
	profile::UserProfile,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestProfileClient;

/// [`oauth2`] client preconfigured with the strategy's endpoints, credentials,
/// and callback URL.
pub type ConfiguredOAuth2Client =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport.
pub type ReqwestStrategy<V> = OnyxAuthStrategy<V, ReqwestProfileClient>;

/// Tokens issued by the OAuth2 core after a successful exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenGrant {
	/// Access token used as bearer credential against OnyxAuth resource APIs.
	pub access_token: String,
	/// Refresh token, when the provider issued one.
	pub refresh_token: Option<String>,
}
impl TokenGrant {
	/// Creates a grant carrying only an access token.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self { access_token: access_token.into(), refresh_token: None }
	}

	/// Attaches the refresh token issued alongside the access token.
	pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(token.into());

		self
	}
}
impl Debug for TokenGrant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenGrant")
			.field("refresh_token_set", &self.refresh_token.is_some())
			.finish_non_exhaustive()
	}
}

/// Application verdict produced by a [`VerifyCredentials`] hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verified<U> {
	/// The credentials map to an application user.
	Granted(U),
	/// The credentials are well-formed but the application rejected the login.
	Denied,
}

/// Application hook that turns a fetched profile into an application user.
///
/// This is the strategy's equivalent of the hosting framework's verify
/// callback: the OAuth2 core completes the token exchange, the strategy fetches
/// and normalizes the profile, and the hook decides whether the login maps to a
/// user. The hook works on crate-owned data types only, so implementations stay
/// decoupled from any HTTP client. Closures of the matching shape implement the
/// trait automatically.
pub trait VerifyCredentials
where
	Self: Send + Sync,
{
	/// Application user type produced on success.
	type User: Send;

	/// Decides whether the grant and profile map to an application user.
	fn verify(
		&self,
		grant: &TokenGrant,
		profile: &UserProfile,
	) -> Result<Verified<Self::User>, BoxError>;
}
impl<F, U> VerifyCredentials for F
where
	F: Fn(&TokenGrant, &UserProfile) -> Result<Verified<U>, BoxError> + Send + Sync,
	U: Send,
{
	type User = U;

	fn verify(&self, grant: &TokenGrant, profile: &UserProfile) -> Result<Verified<U>, BoxError> {
		self(grant, profile)
	}
}

/// Result of [`OnyxAuthStrategy::authenticate`].
#[derive(Clone, Debug)]
pub struct Authentication<U> {
	/// Normalized profile fetched from OnyxAuth.
	pub profile: UserProfile,
	/// Application verdict for the login.
	pub outcome: Verified<U>,
}

/// OnyxAuth authentication strategy.
///
/// Holds immutable configuration, an `Arc` transport, and the application
/// verify hook; it carries no other state, so concurrent profile fetches for
/// simultaneous login flows are independent.
#[derive(Clone)]
pub struct OnyxAuthStrategy<V, C>
where
	V: VerifyCredentials,
	C: ?Sized + ProfileHttpClient,
{
	/// Immutable strategy configuration.
	pub config: StrategyConfig,
	/// HTTP client used for profile fetches.
	pub http_client: Arc<C>,
	verify: V,
}
impl<V, C> OnyxAuthStrategy<V, C>
where
	V: VerifyCredentials,
	C: ?Sized + ProfileHttpClient,
{
	/// Strategy name used by hosting frameworks to route requests.
	pub const NAME: &'static str = "onyxauth";

	/// Creates a strategy that reuses a caller-provided transport.
	pub fn with_http_client(
		config: StrategyConfig,
		verify: V,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { config, http_client: http_client.into(), verify }
	}

	/// Strategy name (`"onyxauth"`).
	pub fn name(&self) -> &'static str {
		Self::NAME
	}

	/// Builds an [`oauth2`] client wired with this strategy's endpoints,
	/// credentials, and callback URL.
	///
	/// This is the composition seam towards the OAuth2 core: hand the client to
	/// whatever drives the authorization-code handshake, then feed the issued
	/// tokens back through [`authenticate`](Self::authenticate).
	pub fn oauth2_client(&self) -> Result<ConfiguredOAuth2Client> {
		let auth_url = AuthUrl::new(self.config.authorization_url.to_string())
			.map_err(|source| Error::InvalidEndpoint { source })?;
		let token_url = TokenUrl::new(self.config.token_url.to_string())
			.map_err(|source| Error::InvalidEndpoint { source })?;
		let redirect_url = RedirectUrl::new(self.config.callback_url.to_string())
			.map_err(|source| Error::InvalidEndpoint { source })?;

		Ok(BasicClient::new(ClientId::new(self.config.client_id.clone()))
			.set_client_secret(ClientSecret::new(self.config.client_secret.clone()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_redirect_uri(redirect_url))
	}

	/// Fetches and normalizes the user's OnyxAuth profile.
	///
	/// Single network call, single-shot completion: transport failures and
	/// non-2xx statuses surface as [`TransportError`], malformed bodies as
	/// [`ParseError`](crate::error::ParseError), and — under the strict policy —
	/// missing required fields as [`ProfileError`](crate::error::ProfileError).
	/// No retries, no caching, no adapter-imposed timeout.
	pub async fn user_profile(&self, access_token: &str) -> Result<UserProfile> {
		let span = FetchSpan::new("user_profile");
		let fetch = async move {
			let response =
				self.http_client.get_with_bearer(&self.config.profile_url, access_token).await?;

			if !response.is_success() {
				return Err(TransportError::Status {
					status: response.status,
					body: Some(response.body),
				}
				.into());
			}

			UserProfile::from_response(&response.body, self.config.missing_field_policy)
		};

		span.instrument(fetch).await
	}

	/// Runs the application verify hook against an already-fetched profile.
	pub fn verify(&self, grant: &TokenGrant, profile: &UserProfile) -> Result<Verified<V::User>> {
		self.verify.verify(grant, profile).map_err(Error::verify)
	}

	/// Completes the post-exchange leg: fetch the profile, then let the
	/// application decide.
	pub async fn authenticate(&self, grant: TokenGrant) -> Result<Authentication<V::User>> {
		let profile = self.user_profile(&grant.access_token).await?;
		let outcome = self.verify(&grant, &profile)?;

		Ok(Authentication { profile, outcome })
	}
}
#[cfg(feature = "reqwest")]
impl<V> OnyxAuthStrategy<V, ReqwestProfileClient>
where
	V: VerifyCredentials,
{
	/// Creates a strategy backed by the crate's default reqwest transport.
	pub fn new(config: StrategyConfig, verify: V) -> Self {
		Self::with_http_client(config, verify, ReqwestProfileClient::default())
	}
}
impl<V, C> Debug for OnyxAuthStrategy<V, C>
where
	V: VerifyCredentials,
	C: ?Sized + ProfileHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OnyxAuthStrategy")
			.field("name", &Self::NAME)
			.field("config", &self.config)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		config::MissingFieldPolicy,
		error::ProfileError,
		http::{ProfileFuture, ProfileResponse},
		profile::PROVIDER,
	};

	const ADA_BODY: &str = r#"{"profile":{"id":"42","displayName":"Ada Lovelace","familyName":"Lovelace","givenName":"Ada","email":"ada@example.com"}}"#;

	struct CannedHttpClient {
		status: u16,
		body: &'static str,
	}
	impl ProfileHttpClient for CannedHttpClient {
		fn get_with_bearer<'a>(&'a self, _url: &'a Url, _access_token: &'a str) -> ProfileFuture<'a> {
			let response = ProfileResponse { status: self.status, body: self.body.to_owned() };

			Box::pin(async move { Ok(response) })
		}
	}

	struct RefusingHttpClient;
	impl ProfileHttpClient for RefusingHttpClient {
		fn get_with_bearer<'a>(&'a self, _url: &'a Url, _access_token: &'a str) -> ProfileFuture<'a> {
			Box::pin(async move {
				Err(TransportError::Io(std::io::Error::new(
					std::io::ErrorKind::ConnectionRefused,
					"connection refused",
				)))
			})
		}
	}

	fn allow(
		_grant: &TokenGrant,
		profile: &UserProfile,
	) -> Result<Verified<String>, BoxError> {
		Ok(Verified::Granted(profile.id.clone().unwrap_or_default()))
	}

	fn config(policy: MissingFieldPolicy) -> StrategyConfig {
		StrategyConfig::builder()
			.client_id("client-unit")
			.client_secret("secret-unit")
			.callback_url(
				Url::parse("https://www.example.net/auth/onyxauth/callback")
					.expect("Callback URL fixture should parse successfully."),
			)
			.missing_field_policy(policy)
			.build()
			.expect("Unit test configuration should build successfully.")
	}

	#[tokio::test]
	async fn user_profile_normalizes_success_responses() {
		let strategy = OnyxAuthStrategy::with_http_client(
			config(MissingFieldPolicy::Lenient),
			allow,
			CannedHttpClient { status: 200, body: ADA_BODY },
		);
		let profile = strategy
			.user_profile("token-ada")
			.await
			.expect("Profile fetch should succeed for a complete payload.");

		assert_eq!(profile.provider, PROVIDER);
		assert_eq!(profile.id.as_deref(), Some("42"));
		assert_eq!(profile.display_name.as_deref(), Some("Ada Lovelace"));
		assert_eq!(profile.raw, ADA_BODY);
	}

	#[tokio::test]
	async fn user_profile_classifies_status_failures() {
		let strategy = OnyxAuthStrategy::with_http_client(
			config(MissingFieldPolicy::Lenient),
			allow,
			CannedHttpClient { status: 502, body: "upstream down" },
		);
		let err = strategy
			.user_profile("token")
			.await
			.expect_err("Non-success statuses should fail the fetch.");

		match err {
			Error::Transport(TransportError::Status { status, body }) => {
				assert_eq!(status, 502);
				assert_eq!(body.as_deref(), Some("upstream down"));
			},
			other => panic!("Expected a status transport error, got {other:?}."),
		}
	}

	#[tokio::test]
	async fn user_profile_surfaces_network_failures() {
		let strategy = OnyxAuthStrategy::with_http_client(
			config(MissingFieldPolicy::Lenient),
			allow,
			RefusingHttpClient,
		);
		let err = strategy
			.user_profile("token")
			.await
			.expect_err("Network failures should fail the fetch.");

		assert!(matches!(err, Error::Transport(TransportError::Io(_))));
	}

	#[tokio::test]
	async fn user_profile_honors_the_strict_policy() {
		let strategy = OnyxAuthStrategy::with_http_client(
			config(MissingFieldPolicy::Strict),
			allow,
			CannedHttpClient { status: 200, body: r#"{"profile":{"displayName":"Ada"}}"# },
		);
		let err = strategy
			.user_profile("token")
			.await
			.expect_err("Strict policy should reject a missing identifier.");

		assert!(matches!(
			err,
			Error::Profile(ProfileError::MissingField { field: "profile.id" })
		));
	}

	#[tokio::test]
	async fn authenticate_feeds_grant_and_profile_to_the_verify_hook() {
		let verify = |grant: &TokenGrant, profile: &UserProfile| -> Result<Verified<String>, BoxError> {
			assert_eq!(grant.access_token, "token-ada");
			assert_eq!(grant.refresh_token.as_deref(), Some("refresh-ada"));

			match profile.id.as_deref() {
				Some(id) => Ok(Verified::Granted(format!("user-{id}"))),
				None => Ok(Verified::Denied),
			}
		};
		let strategy = OnyxAuthStrategy::with_http_client(
			config(MissingFieldPolicy::Lenient),
			verify,
			CannedHttpClient { status: 200, body: ADA_BODY },
		);
		let authentication = strategy
			.authenticate(TokenGrant::new("token-ada").with_refresh_token("refresh-ada"))
			.await
			.expect("Authentication should succeed for a complete payload.");

		assert_eq!(authentication.outcome, Verified::Granted("user-42".into()));
		assert_eq!(authentication.profile.id.as_deref(), Some("42"));
	}

	#[tokio::test]
	async fn verify_hook_failures_wrap_into_verify_errors() {
		let verify = |_: &TokenGrant, _: &UserProfile| -> Result<Verified<()>, BoxError> {
			Err("user store unavailable".into())
		};
		let strategy = OnyxAuthStrategy::with_http_client(
			config(MissingFieldPolicy::Lenient),
			verify,
			CannedHttpClient { status: 200, body: ADA_BODY },
		);
		let err = strategy
			.authenticate(TokenGrant::new("token"))
			.await
			.expect_err("Verify hook failures should surface as errors.");

		assert!(matches!(err, Error::Verify { .. }));
	}

	#[test]
	fn oauth2_client_builds_from_the_configuration() {
		let strategy = OnyxAuthStrategy::with_http_client(
			config(MissingFieldPolicy::Lenient),
			allow,
			CannedHttpClient { status: 200, body: "{}" },
		);

		strategy.oauth2_client().expect("OAuth2 client wiring should succeed.");
	}

	#[test]
	fn debug_renderings_hide_secrets() {
		let strategy = OnyxAuthStrategy::with_http_client(
			config(MissingFieldPolicy::Lenient),
			allow,
			CannedHttpClient { status: 200, body: "{}" },
		);
		let rendered = format!("{strategy:?}");

		assert_eq!(strategy.name(), "onyxauth");
		assert!(rendered.contains("client-unit"));
		assert!(!rendered.contains("secret-unit"));

		let grant = TokenGrant::new("super-secret-token").with_refresh_token("super-secret-refresh");
		let rendered = format!("{grant:?}");

		assert!(!rendered.contains("super-secret"));
		assert!(rendered.contains("refresh_token_set: true"));
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn reqwest_strategy_builds_from_test_helpers() {
		let base = Url::parse("http://127.0.0.1:8080/")
			.expect("Base URL fixture should parse successfully.");
		let strategy = crate::_preludet::build_test_strategy(&base, allow);

		assert_eq!(strategy.name(), "onyxauth");
		assert_eq!(strategy.config.profile_url.path(), "/oauth2/users/profile");
	}
}
