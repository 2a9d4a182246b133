//! Admin SDK Directory API `users` client.

use std::io::Read;

use serde::Deserialize;
use serde_json::Value;

use bamboosync_core::{ApiError, Directory, DirectoryError, DirectoryUser, UserBody, UserQuery};

use crate::auth::TokenSource;

pub const DEFAULT_BASE_URL: &str = "https://admin.googleapis.com/admin/directory/v1";

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct UserListResponse {
    #[serde(default)]
    users: Vec<DirectoryUser>,
}

/// Blocking Directory API client.
pub struct DirectoryClient {
    agent: ureq::Agent,
    base_url: String,
    tokens: Box<dyn TokenSource>,
}

impl DirectoryClient {
    pub fn new(tokens: Box<dyn TokenSource>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, tokens)
    }

    pub fn with_base_url(base_url: impl Into<String>, tokens: Box<dyn TokenSource>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            tokens,
        }
    }

    /// `users` collection URL, or one user's URL with `user_key` as a
    /// percent-encoded path segment.
    fn users_url(&self, user_key: Option<&str>) -> String {
        match user_key {
            Some(key) => format!("{}/users/{}", self.base_url, urlencoding::encode(key)),
            None => format!("{}/users", self.base_url),
        }
    }

    fn request(&self, method: &str, url: &str) -> Result<ureq::Request, DirectoryError> {
        let token = self.tokens.access_token()?;
        Ok(self
            .agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {token}"))
            .set("Accept", "application/json"))
    }
}

/// Turn a ureq result into a response or a classified [`DirectoryError`].
fn classify(
    result: Result<ureq::Response, ureq::Error>,
) -> Result<ureq::Response, DirectoryError> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(status, response)) => {
            let status_text = response.status_text().to_owned();
            let body = response.into_string().unwrap_or_default();
            Err(DirectoryError::Api(api_error(status, &status_text, &body)))
        }
        Err(ureq::Error::Transport(err)) => Err(DirectoryError::Transport(err.to_string())),
    }
}

/// Map a Google error reply onto [`ApiError`]. Bodies that are not the
/// standard error envelope fall back to the HTTP status text.
pub(crate) fn api_error(status: u16, status_text: &str, body: &str) -> ApiError {
    match serde_json::from_str::<GoogleErrorEnvelope>(body) {
        Ok(envelope) => ApiError {
            status_code: status,
            reason: envelope
                .error
                .message
                .unwrap_or_else(|| status_text.to_owned()),
            error_details: envelope.error.errors.unwrap_or(Value::Null),
        },
        Err(_) => ApiError {
            status_code: status,
            reason: status_text.to_owned(),
            error_details: if body.is_empty() {
                Value::Null
            } else {
                Value::String(body.to_owned())
            },
        },
    }
}

/// Full response body. `into_string` would reject bodies over 10 MB.
fn read_body(response: ureq::Response) -> Result<Vec<u8>, DirectoryError> {
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|e| DirectoryError::Transport(e.to_string()))?;
    Ok(body)
}

impl Directory for DirectoryClient {
    fn insert_user(&self, body: &UserBody) -> Result<(), DirectoryError> {
        let url = self.users_url(None);
        tracing::debug!(primary_email = ?body.primary_email, "POST users");
        classify(self.request("POST", &url)?.send_json(body))?;
        Ok(())
    }

    fn update_user(&self, user_key: &str, body: &UserBody) -> Result<(), DirectoryError> {
        let url = self.users_url(Some(user_key));
        tracing::debug!(%user_key, "PUT users");
        classify(self.request("PUT", &url)?.send_json(body))?;
        Ok(())
    }

    fn delete_user(&self, user_key: &str) -> Result<(), DirectoryError> {
        let url = self.users_url(Some(user_key));
        tracing::debug!(%user_key, "DELETE users");
        classify(self.request("DELETE", &url)?.call())?;
        Ok(())
    }

    fn list_users(&self, query: &UserQuery) -> Result<Vec<DirectoryUser>, DirectoryError> {
        let url = self.users_url(None);
        let max_results = query.max_results.to_string();
        tracing::debug!(query = %query.query, "GET users");
        let request = self
            .request("GET", &url)?
            .query("customer", &query.customer)
            .query("query", &query.query)
            .query("maxResults", &max_results);
        let body = read_body(classify(request.call())?)?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let listing: UserListResponse = serde_json::from_slice(&body)?;
        Ok(listing.users)
    }
}
