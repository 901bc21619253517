//! Walks through wiring the OnyxAuth strategy into an application: build the
//! configuration, hand the OAuth2 client to whatever drives the handshake, and
//! run the verify hook over a normalized profile.

// crates.io
use color_eyre::Result;
use url::Url;
// self
use onyxauth_strategy::{
	config::StrategyConfig,
	error::BoxError,
	profile::UserProfile,
	strategy::{OnyxAuthStrategy, TokenGrant, Verified},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = StrategyConfig::builder()
		.client_id("123-456-789")
		.client_secret("shhh-its-a-secret")
		.callback_url(Url::parse("https://www.example.net/auth/onyxauth/callback")?)
		.build()?;
	let verify = |_grant: &TokenGrant, profile: &UserProfile| -> Result<Verified<String>, BoxError> {
		// A real application would look the user up (or create one) here.
		match profile.id.clone() {
			Some(id) => Ok(Verified::Granted(format!("user-{id}"))),
			None => Ok(Verified::Denied),
		}
	};
	let strategy = OnyxAuthStrategy::new(config, verify);

	println!("Registered strategy `{}`.", strategy.name());
	println!("Authorization endpoint: {}.", &strategy.config.authorization_url);
	println!("Token endpoint: {}.", &strategy.config.token_url);

	// Hand this client to the OAuth2 core that drives the redirect/callback
	// handshake; it resolves an authorization code into a TokenGrant.
	let _oauth2_client = strategy.oauth2_client()?;

	// Simulate the post-exchange leg with a canned provider response instead of
	// calling the live profile endpoint.
	let body = r#"{"profile":{"id":"42","displayName":"Ada Lovelace","familyName":"Lovelace","givenName":"Ada","email":"ada@example.com"}}"#;
	let profile = UserProfile::from_response(body, strategy.config.missing_field_policy)?;

	println!(
		"Fetched profile for {} <{}>.",
		profile.display_name.as_deref().unwrap_or("unknown"),
		profile.emails.first().map(|email| email.value.as_str()).unwrap_or("no email")
	);

	let grant = TokenGrant::new("access-token").with_refresh_token("refresh-token");

	match strategy.verify(&grant, &profile)? {
		Verified::Granted(user) => println!("Login granted: {user}."),
		Verified::Denied => println!("Login denied by the application."),
	}

	Ok(())
}
