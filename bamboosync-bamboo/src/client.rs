//! Authenticated GET access to the BambooHR REST API.

use std::io::Read;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;

use bamboosync_core::HrError;

/// Production API root; `{subdomain}` is the company's BambooHR subdomain.
pub const DEFAULT_BASE_URL: &str = "https://api.bamboohr.com/api/gateway.php";

/// BambooHR API client.
///
/// Authenticates with HTTP Basic auth: the API key as user name and a fixed
/// `x` as password. Errors are returned as-is; nothing is retried.
#[derive(Clone)]
pub struct BambooClient {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
}

impl std::fmt::Debug for BambooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BambooClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl BambooClient {
    /// Client for `https://api.bamboohr.com/api/gateway.php/<subdomain>/v1`.
    pub fn new(subdomain: &str, api_key: &str) -> Self {
        Self::with_base_url(format!("{DEFAULT_BASE_URL}/{subdomain}/v1"), api_key)
    }

    /// Client rooted at an explicit versioned base URL.
    pub fn with_base_url(base_url: impl Into<String>, api_key: &str) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let credentials = STANDARD.encode(format!("{api_key}:x"));
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url,
            authorization: format!("Basic {credentials}"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` (relative to the base URL) with optional query parameters
    /// and decode the JSON reply.
    pub fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, HrError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        tracing::debug!(%path, ?params, "HR request");

        let mut request = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .set("Authorization", &self.authorization);
        for (name, value) in params {
            request = request.query(name, value);
        }

        match request.call() {
            Ok(response) => {
                // Read through the raw reader; `into_string` caps bodies at 10 MB.
                let mut body = Vec::new();
                response
                    .into_reader()
                    .read_to_end(&mut body)
                    .map_err(|e| HrError::Transport {
                        path: path.to_owned(),
                        message: e.to_string(),
                    })?;
                serde_json::from_slice(&body).map_err(|source| HrError::Decode {
                    path: path.to_owned(),
                    source,
                })
            }
            Err(ureq::Error::Status(status, response)) => Err(HrError::Status {
                path: path.to_owned(),
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(err)) => Err(HrError::Transport {
                path: path.to_owned(),
                message: err.to_string(),
            }),
        }
    }
}
