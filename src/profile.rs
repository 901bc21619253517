//! Normalized user profiles and the extraction from OnyxAuth's payload shape.
//!
//! OnyxAuth answers profile requests with
//! `{ "profile": { "id", "displayName", "familyName", "givenName", "email" } }`.
//! Normalization maps that into [`UserProfile`], keeping the literal body and
//! the decoded structure around so applications can reach provider-specific
//! fields outside the canonical shape.

// self
use crate::{
	_prelude::*,
	config::MissingFieldPolicy,
	error::{ParseError, ProfileError},
};

/// Provider tag stamped onto every normalized profile.
pub const PROVIDER: &str = "onyxauth";

/// Canonical user profile produced by a successful fetch.
///
/// A fresh value is constructed on every fetch; it has no identity beyond the
/// call that produced it and ownership transfers to the caller on return.
/// `id` and `display_name` stay `Option` because the lenient policy mirrors the
/// provider's lax contract; see [`MissingFieldPolicy`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Provider tag; always [`PROVIDER`].
	pub provider: String,
	/// Provider-assigned unique user identifier.
	pub id: Option<String>,
	/// Human-readable display name.
	pub display_name: Option<String>,
	/// Structured name parts.
	pub name: PersonName,
	/// Email addresses; zero or one for this provider.
	pub emails: Vec<EmailAddress>,
	/// Literal response body, retained for diagnostics.
	pub raw: String,
	/// Decoded response structure, retained for provider-specific fields.
	pub parsed: serde_json::Value,
}

/// Structured name parts of a normalized profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
	/// Family name, when the provider supplied one.
	pub family_name: Option<String>,
	/// Given name, when the provider supplied one.
	pub given_name: Option<String>,
}

/// A single email address entry of a normalized profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
	/// The address itself.
	pub value: String,
}

impl UserProfile {
	/// Parses a profile endpoint response body and normalizes it.
	///
	/// Malformed JSON fails with [`ParseError::Json`]. A well-formed body that
	/// lacks the nested `profile` object or its sub-fields normalizes to `None`
	/// fields under [`MissingFieldPolicy::Lenient`]; under
	/// [`MissingFieldPolicy::Strict`] an absent `profile.id` or
	/// `profile.displayName` fails with [`ProfileError::MissingField`] instead
	/// of producing a partial profile.
	pub fn from_response(body: &str, policy: MissingFieldPolicy) -> Result<Self> {
		let mut deserializer = serde_json::Deserializer::from_str(body);
		let parsed: serde_json::Value = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ParseError::Json { source, body: body.to_owned() })?;
		let payload = parsed.get("profile");
		let id = string_field(payload, "id");
		let display_name = string_field(payload, "displayName");

		if matches!(policy, MissingFieldPolicy::Strict) {
			if id.is_none() {
				return Err(ProfileError::MissingField { field: "profile.id" }.into());
			}
			if display_name.is_none() {
				return Err(ProfileError::MissingField { field: "profile.displayName" }.into());
			}
		}

		let name = PersonName {
			family_name: string_field(payload, "familyName"),
			given_name: string_field(payload, "givenName"),
		};
		let emails =
			string_field(payload, "email").map(|value| vec![EmailAddress { value }]).unwrap_or_default();

		Ok(Self {
			provider: PROVIDER.into(),
			id,
			display_name,
			name,
			emails,
			raw: body.to_owned(),
			parsed,
		})
	}
}

fn string_field(payload: Option<&serde_json::Value>, key: &str) -> Option<String> {
	payload?.get(key)?.as_str().map(str::to_owned)
}
