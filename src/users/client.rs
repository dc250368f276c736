use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Debug as FmtDebug;
use tracing::instrument;

use crate::{
    error::Result,
    http,
    ocs::{Ocs, UserProfileFields},
    users::model::*,
};

/// Characters left alone when a user id goes into a path segment.
const USER_ID: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn user_path<S: AsRef<str>>(user_id: S) -> String {
    format!(
        "/ocs/v2.php/cloud/users/{}",
        utf8_percent_encode(user_id.as_ref(), USER_ID)
    )
}

/// Provides methods to read and edit Nextcloud user profiles.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: http::Client,
}

impl Client {
    pub(crate) fn new(http_client: http::Client) -> Self {
        Self { http_client }
    }

    /// Get the profile fields the authenticated user is allowed to edit.
    #[instrument(skip(self))]
    pub async fn editable_fields(&self) -> Result<UserProfileFields> {
        self.http_client
            .get("/ocs/v2.php/cloud/user/fields")
            .await?
            .ocs()
            .await
    }

    /// Retrieve the authenticated user.
    #[instrument(skip(self))]
    pub async fn current(&self) -> Result<UserProfile> {
        self.http_client
            .get("/ocs/v2.php/cloud/user")
            .await?
            .ocs()
            .await
            .map(Ocs::into_data)
    }

    /// Retrieve a user by id.
    #[instrument(skip(self))]
    pub async fn get<S>(&self, user_id: S) -> Result<UserProfile>
    where
        S: AsRef<str> + FmtDebug,
    {
        self.http_client
            .get(user_path(user_id))
            .await?
            .ocs()
            .await
            .map(Ocs::into_data)
    }

    /// List user ids, optionally filtered by a search term.
    #[instrument(skip(self))]
    pub async fn list(&self, opts: ListOptions) -> Result<Vec<String>> {
        let query_string = serde_qs::to_string(&opts)?;
        let path = if query_string.is_empty() {
            "/ocs/v2.php/cloud/users".to_string()
        } else {
            format!("/ocs/v2.php/cloud/users?{}", query_string)
        };

        let list: Ocs<UserList> = self.http_client.get(path).await?.ocs().await?;
        Ok(list.data.users)
    }

    /// Set the value of a profile field.
    #[instrument(skip(self, value))]
    pub async fn set_field<S, F, V>(&self, user_id: S, field: F, value: V) -> Result<()>
    where
        S: AsRef<str> + FmtDebug,
        F: AsRef<str> + FmtDebug,
        V: Into<String>,
    {
        let req = UpdateRequest {
            key: field.as_ref().to_string(),
            value: value.into(),
        };
        self.update(user_id, req).await
    }

    /// Set who can see a profile field.
    #[instrument(skip(self))]
    pub async fn set_scope<S, F>(&self, user_id: S, field: F, scope: Scope) -> Result<()>
    where
        S: AsRef<str> + FmtDebug,
        F: AsRef<str> + FmtDebug,
    {
        let req = UpdateRequest {
            key: format!("{}Scope", field.as_ref()),
            value: scope.as_str().to_string(),
        };
        self.update(user_id, req).await
    }

    async fn update<S: AsRef<str>>(&self, user_id: S, req: UpdateRequest) -> Result<()> {
        let _: Ocs<serde_json::Value> = self
            .http_client
            .put(user_path(user_id), &req)
            .await?
            .ocs()
            .await?;
        Ok(())
    }
}
