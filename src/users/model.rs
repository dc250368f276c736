use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::Error;

/// A Nextcloud user profile as returned by the provisioning API.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq, Debug)]
pub struct UserProfile {
    /// The user's unique identifier.
    pub id: String,
    #[serde(
        rename = "displayname",
        alias = "display-name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Group ids, in server order.
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(
        rename = "lastLogin",
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(
        rename = "displaynameScope",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name_scope: Option<Scope>,
    #[serde(rename = "emailScope", default, skip_serializing_if = "Option::is_none")]
    pub email_scope: Option<Scope>,
    #[serde(rename = "phoneScope", default, skip_serializing_if = "Option::is_none")]
    pub phone_scope: Option<Scope>,
    #[serde(
        rename = "addressScope",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub address_scope: Option<Scope>,
    #[serde(
        rename = "websiteScope",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub website_scope: Option<Scope>,
    #[serde(
        rename = "twitterScope",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub twitter_scope: Option<Scope>,
    #[serde(
        rename = "avatarScope",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_scope: Option<Scope>,
}

impl UserProfile {
    /// The value currently stored for an editable field.
    pub fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::DisplayName => self.display_name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::Address => self.address.as_deref(),
            Field::Website => self.website.as_deref(),
            Field::Twitter => self.twitter.as_deref(),
        }
    }

    /// The visibility scope currently set for an editable field.
    pub fn scope(&self, field: Field) -> Option<Scope> {
        match field {
            Field::DisplayName => self.display_name_scope,
            Field::Email => self.email_scope,
            Field::Phone => self.phone_scope,
            Field::Address => self.address_scope,
            Field::Website => self.website_scope,
            Field::Twitter => self.twitter_scope,
        }
    }
}

/// Who can see a profile field.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Scope {
    /// Only visible to the user and contacts on the same server.
    #[serde(rename = "v2-private", alias = "private")]
    Private,
    /// Visible to users on the same server.
    #[serde(rename = "v2-local", alias = "contacts")]
    Local,
    /// Synced to trusted servers.
    #[serde(rename = "v2-federated")]
    Federated,
    /// Published to the global address book.
    #[serde(rename = "v2-published", alias = "public")]
    Published,
}

impl Scope {
    /// The value the server expects when setting a scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Private => "v2-private",
            Scope::Local => "v2-local",
            Scope::Federated => "v2-federated",
            Scope::Published => "v2-published",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v2-private" | "private" => Ok(Scope::Private),
            "v2-local" | "contacts" => Ok(Scope::Local),
            "v2-federated" => Ok(Scope::Federated),
            "v2-published" | "public" => Ok(Scope::Published),
            _ => Err(Error::InvalidScope(s.to_string())),
        }
    }
}

/// An editable profile field.
///
/// The server may report fields this enum doesn't know, so
/// [`super::Client::editable_fields`] returns plain strings.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    DisplayName,
    Email,
    Phone,
    Address,
    Website,
    Twitter,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::DisplayName => "displayname",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::Website => "website",
            Field::Twitter => "twitter",
        }
    }
}

impl AsRef<str> for Field {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "displayname" | "display-name" => Ok(Field::DisplayName),
            "email" => Ok(Field::Email),
            "phone" => Ok(Field::Phone),
            "address" => Ok(Field::Address),
            "website" => Ok(Field::Website),
            "twitter" => Ok(Field::Twitter),
            _ => Err(Error::InvalidField(s.to_string())),
        }
    }
}

/// The body of a profile update.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub(crate) struct UpdateRequest {
    pub key: String,
    pub value: String,
}

/// Sets the options for listing users.
#[derive(Serialize, Default, Debug)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[derive(Deserialize, Default, Debug)]
pub(crate) struct UserList {
    #[serde(default)]
    pub users: Vec<String>,
}
