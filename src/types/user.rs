//! User Types
//!
//! User-info record returned by the identity endpoint in JSON format.
//! Which optional fields are present depends on the scopes granted to the
//! token: `login:email` for emails, `login:avatar` for avatar fields,
//! `login:birthday` for the birthday, `login:info` for name fields,
//! `login:default_phone` for the phone.

use chrono::NaiveDate;
use serde::Deserialize;

/// User sex.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Woman,
}

/// User phone number.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Phone {
    /// Phone ID assigned by the provider.
    pub id: i64,
    /// Phone number.
    pub number: String,
}

/// Authenticated user's profile.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct User {
    /// User login.
    pub login: String,
    /// User ID.
    pub id: String,
    /// Client ID of the application the token was issued to.
    pub client_id: String,
    /// Per-application stable user identifier.
    pub psuid: String,

    /// OpenID identities; present only with `with_openid_identity`.
    #[serde(default)]
    pub openid_identities: Option<Vec<String>>,

    /// Default email address.
    #[serde(default)]
    pub default_email: Option<String>,
    /// All email addresses.
    #[serde(default)]
    pub emails: Option<Vec<String>>,

    /// Default avatar ID, usable with the avatar URL helpers.
    #[serde(default)]
    pub default_avatar_id: Option<String>,
    /// Whether the avatar is the provider's stub image.
    #[serde(default)]
    pub is_avatar_empty: Option<bool>,

    /// Birthday as sent by the provider; may be zero-padded placeholder
    /// text rather than a date.
    #[serde(default)]
    pub birthday: Option<String>,

    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// First and last name.
    #[serde(default)]
    pub real_name: Option<String>,
    /// Sex.
    #[serde(default)]
    pub sex: Option<Sex>,

    /// Default phone number.
    #[serde(default)]
    pub default_phone: Option<Phone>,
}

impl User {
    /// The birthday as a calendar date, when the provider sent a real one.
    pub fn birthday_date(&self) -> Option<NaiveDate> {
        self.birthday
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
    }
}
