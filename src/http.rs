use backoff::{future::retry_notify, ExponentialBackoff, ExponentialBackoffBuilder};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::header;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::{
    error::{Error, OcsError, Result},
    ocs::{Ocs, Overall},
};

pub(crate) static USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Marks a request as an OCS API call so the server answers with an
/// envelope instead of redirecting to the login page.
const HEADER_OCS_API_REQUEST: &str = "OCS-APIRequest";

pub(crate) fn build_backoff() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(500)) // first retry after 500ms
        .with_multiplier(2.0) // all following retries are twice as long as the previous one
        .with_max_elapsed_time(Some(Duration::from_secs(30))) // try up to 30s
        .build()
}

/// Client is a wrapper around `reqwest::Client` which provides automatically
/// prepending the base url and asking for JSON.
#[derive(Debug, Clone)]
pub(crate) struct Client {
    base_url: Url,
    inner: reqwest::Client,
}

#[derive(Clone)]
pub(crate) enum Body {
    Empty,
    Json(serde_json::Value),
}

impl Client {
    /// Creates a new client.
    pub(crate) fn new<U, N, T>(base_url: U, username: N, token: T) -> Result<Self>
    where
        U: AsRef<str>,
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let mut base_url = Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?;
        // Nextcloud is often served from a sub path, which `Url::join`
        // would drop without a trailing slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        // Basic auth can't carry a colon in the user part.
        if username.as_ref().contains(':') {
            return Err(Error::InvalidToken);
        }
        let credentials = STANDARD.encode(format!("{}:{}", username.as_ref(), token.as_ref()));
        let mut auth_header_value =
            header::HeaderValue::from_str(&format!("Basic {}", credentials))
                .map_err(|_e| Error::InvalidToken)?;
        auth_header_value.set_sensitive(true);

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::AUTHORIZATION, auth_header_value);
        default_headers.insert(
            HEADER_OCS_API_REQUEST,
            header::HeaderValue::from_static("true"),
        );
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(Error::HttpClientSetup)?;

        Ok(Self {
            base_url,
            inner: http_client,
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(Error::InvalidUrl)?;
        url.query_pairs_mut().append_pair("format", "json");
        Ok(url)
    }

    async fn execute<P>(&self, method: http::Method, path: P, body: Body) -> Result<Response>
    where
        P: AsRef<str>,
    {
        let url = self.url(path.as_ref())?;

        let res = retry_notify(
            build_backoff(),
            || async {
                let mut req = self.inner.request(method.clone(), url.clone());
                match body.clone() {
                    Body::Empty => {}
                    Body::Json(value) => req = req.json(&value),
                }
                self.inner.execute(req.build()?).await.map_err(|e| {
                    if let Some(status) = e.status() {
                        if status.is_client_error() {
                            // Don't retry 4XX
                            return backoff::Error::permanent(e);
                        }
                    }

                    backoff::Error::transient(e)
                })
            },
            |e: reqwest::Error, after: Duration| {
                debug!(error = %e, retry_in = ?after, "request failed, retrying");
            },
        )
        .await
        .map(|res| Response::new(res, method, path.as_ref().to_string()))
        .map_err(Error::Http)?;

        Ok(res)
    }

    pub(crate) async fn get<S>(&self, path: S) -> Result<Response>
    where
        S: AsRef<str>,
    {
        self.execute(http::Method::GET, path.as_ref(), Body::Empty)
            .await
    }

    pub(crate) async fn put<S, P>(&self, path: S, payload: P) -> Result<Response>
    where
        S: AsRef<str>,
        P: Serialize,
    {
        self.execute(
            http::Method::PUT,
            path,
            Body::Json(serde_json::to_value(payload).map_err(Error::Serialize)?),
        )
        .await
    }
}

#[derive(Debug)]
pub(crate) struct Response {
    inner: reqwest::Response,
    method: http::Method,
    path: String,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response, method: http::Method, path: String) -> Self {
        Self {
            inner,
            method,
            path,
        }
    }

    pub(crate) async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.check_error()
            .await?
            .inner
            .json::<T>()
            .await
            .map_err(Error::Deserialize)
    }

    /// Decode the OCS envelope, failing on a non-success status in the
    /// metadata.
    pub(crate) async fn ocs<T>(self) -> Result<Ocs<T>>
    where
        T: DeserializeOwned + Default,
    {
        let status = self.inner.status().as_u16();
        let method = self.method.clone();
        let path = self.path.clone();
        match self.json::<Overall<T>>().await?.into_result() {
            Ok(ocs) => Ok(ocs),
            Err(Error::Failure(meta)) => {
                let e = OcsError::from_meta(status, method, path, meta);
                warn!(error = %e, "OCS request failed");
                Err(Error::Ocs(e))
            }
            Err(e) => Err(e),
        }
    }

    pub(crate) async fn check_error(self) -> Result<Response> {
        let status = self.inner.status();
        if !status.is_success() {
            // Try to decode the envelope for the OCS status and message
            let e = match self.inner.json::<Overall<serde_json::Value>>().await {
                Ok(overall) => {
                    let meta = overall.ocs.meta;
                    OcsError::new(
                        status.as_u16(),
                        self.method,
                        self.path,
                        Some(meta.status_code),
                        meta.message.filter(|m| !m.is_empty()),
                    )
                }
                // Decoding failed, we still want an OcsError
                Err(_e) => OcsError::new(status.as_u16(), self.method, self.path, None, None),
            };
            warn!(error = %e, "OCS request failed");
            return Err(Error::Ocs(e));
        }

        Ok(self)
    }
}
