//! The OCS response envelope.
//!
//! Every OCS endpoint wraps its payload the same way:
//!
//! ```json
//! {"ocs": {"meta": {"status": "ok", "statuscode": 200, "message": "OK"}, "data": ...}}
//! ```
//!
//! [`Overall`] is the outer object, [`Ocs`] the envelope and [`Meta`] the
//! status block. Payload types plug into `Ocs<T>`, e.g. [`UserProfileFields`].
//!
//! # Examples
//! ```
//! use ocs_rs::ocs::{self, UserProfileFields};
//!
//! let fields: UserProfileFields = ocs::from_str(r#"{"data": ["displayname", "email"]}"#)?;
//! assert_eq!(fields.data(), &["displayname", "email"]);
//! # Ok::<(), ocs_rs::Error>(())
//! ```
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    serde::{deserialize_lenient_string, deserialize_null_default},
};

/// OCS v1 reports success with this status code.
pub const STATUS_CODE_OK_V1: u16 = 100;
/// OCS v2 reports success with this status code.
pub const STATUS_CODE_OK_V2: u16 = 200;

/// Status metadata of an OCS response.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq, Debug)]
pub struct Meta {
    /// Either `ok` or `failure`.
    #[serde(default)]
    pub status: String,
    #[serde(rename = "statuscode", default)]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        rename = "totalitems",
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_items: Option<String>,
    #[serde(
        rename = "itemsperpage",
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub items_per_page: Option<String>,
}

impl Meta {
    /// Returns true if the server reported success.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
            || self.status_code == STATUS_CODE_OK_V1
            || self.status_code == STATUS_CODE_OK_V2
    }
}

/// The generic OCS envelope, `meta` plus a typed `data` payload.
///
/// A missing or `null` payload decodes to `T::default()`.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq, Debug)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub struct Ocs<T> {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub data: T,
}

impl<T> Ocs<T> {
    /// Borrow the payload.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consume the envelope and return the payload.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// The outermost object of an OCS response, `{"ocs": ...}`.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq, Debug)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub struct Overall<T> {
    pub ocs: Ocs<T>,
}

impl<T> Overall<T> {
    /// Unwrap the envelope, turning a failing `meta` into
    /// [`Error::Failure`].
    ///
    /// OCS v1 endpoints answer with HTTP 200 even on failure, so the
    /// envelope status has to be checked separately from the HTTP status.
    pub fn into_result(self) -> Result<Ocs<T>> {
        if self.ocs.meta.is_ok() {
            Ok(self.ocs)
        } else {
            Err(Error::Failure(self.ocs.meta))
        }
    }
}

/// The `data` of `GET /ocs/v2.php/cloud/user/fields`: the names of the
/// profile fields the current user may edit, in server order.
pub type UserProfileFields = Ocs<Vec<String>>;

/// Decode an OCS payload from a string.
pub fn from_str<T: DeserializeOwned>(s: &str) -> Result<T> {
    serde_json::from_str(s).map_err(Error::Decode)
}

/// Decode an OCS payload from bytes.
pub fn from_slice<T: DeserializeOwned>(v: &[u8]) -> Result<T> {
    serde_json::from_slice(v).map_err(Error::Decode)
}
