//! Error type definitions.

use std::fmt;
use thiserror::Error;

use crate::ocs::Meta;

/// A `Result` alias where the `Err` case is `ocs_rs::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for the OCS client.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Missing server URL")]
    MissingUrl,
    #[error("Missing username")]
    MissingUsername,
    #[error("Missing token")]
    MissingToken,
    #[error("Invalid credentials (make sure there are no invalid characters)")]
    InvalidToken,
    #[error("Failed to setup HTTP client: {0}")]
    HttpClientSetup(reqwest::Error),
    #[error("Failed to deserialize response: {0}")]
    Deserialize(reqwest::Error),
    #[error("Failed to decode OCS payload: {0}")]
    Decode(serde_json::Error),
    #[error("Http error: {0}")]
    Http(reqwest::Error),
    #[error(transparent)]
    Ocs(OcsError),
    #[error("OCS envelope reports failure (status {}, code {})", .0.status, .0.status_code)]
    Failure(Meta),
    #[error(transparent)]
    InvalidParams(#[from] serde_qs::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(url::ParseError),
    #[error("Unknown profile field: {0}")]
    InvalidField(String),
    #[error("Unknown visibility scope: {0}")]
    InvalidScope(String),
}

/// An error reported by the OCS API, either through a non-success HTTP
/// status or through a failing status in the envelope metadata.
#[derive(Debug)]
pub struct OcsError {
    pub status: u16,
    pub method: http::Method,
    pub path: String,
    /// The `statuscode` from the envelope, if the body could be decoded.
    pub ocs_status: Option<u16>,
    pub message: Option<String>,
}

impl OcsError {
    pub(crate) fn new(
        status: u16,
        method: http::Method,
        path: String,
        ocs_status: Option<u16>,
        message: Option<String>,
    ) -> Self {
        Self {
            status,
            method,
            path,
            ocs_status,
            message,
        }
    }

    /// Attaches the request an envelope failure was received on.
    pub(crate) fn from_meta(
        status: u16,
        method: http::Method,
        path: String,
        meta: Meta,
    ) -> Self {
        Self::new(
            status,
            method,
            path,
            Some(meta.status_code),
            meta.message.filter(|m| !m.is_empty()),
        )
    }
}

impl std::error::Error for OcsError {}

impl fmt::Display for OcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Received {} on {} {}", self.status, self.method, self.path)?;
        if let Some(code) = self.ocs_status {
            write!(f, " (OCS status {})", code)?;
        }
        if let Some(msg) = self.message.as_ref() {
            write!(f, ": {}", msg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_ocs_status_and_message() {
        let e = OcsError::new(
            404,
            http::Method::GET,
            "/ocs/v2.php/cloud/users/bob".to_string(),
            Some(404),
            Some("User does not exist".to_string()),
        );
        assert_eq!(
            e.to_string(),
            "Received 404 on GET /ocs/v2.php/cloud/users/bob (OCS status 404): User does not exist"
        );
    }

    #[test]
    fn envelope_failure_keeps_http_status() {
        let meta = Meta {
            status: "failure".to_string(),
            status_code: 997,
            message: Some("Unauthorised".to_string()),
            ..Meta::default()
        };
        let e = OcsError::from_meta(200, http::Method::GET, "/x".to_string(), meta);
        assert_eq!(e.status, 200);
        assert_eq!(e.ocs_status, Some(997));
        assert_eq!(
            e.to_string(),
            "Received 200 on GET /x (OCS status 997): Unauthorised"
        );
    }

    #[test]
    fn display_without_body() {
        let e = OcsError::new(502, http::Method::PUT, "/x".to_string(), None, None);
        assert_eq!(e.to_string(), "Received 502 on PUT /x");
    }
}
