//! OAuth2 access tokens for the Admin SDK via a service account.
//!
//! The service account must have domain-wide delegation; tokens are minted
//! for the directory admin it impersonates (JWT `sub`).

use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use bamboosync_core::DirectoryError;

/// Scope required for user insert/update/delete/list.
pub const DIRECTORY_USER_SCOPE: &str = "https://www.googleapis.com/auth/admin.directory.user";

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime; Google caps it at one hour.
const ASSERTION_LIFETIME_SECS: u64 = 3600;

/// Refresh this long before the token's reported expiry.
const EXPIRY_GRACE: Duration = Duration::from_secs(60);

/// Anything that can hand out a bearer token for directory requests.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Result<String, DirectoryError>;
}

/// A fixed, pre-acquired token.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticToken {
    fn access_token(&self) -> Result<String, DirectoryError> {
        Ok(self.0.clone())
    }
}

/// The subset of a Google service-account JSON key file we need.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_owned()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        serde_json::from_str(json)
            .map_err(|e| DirectoryError::Auth(format!("invalid service account key: {e}")))
    }

    pub fn from_file(path: &Path) -> Result<Self, DirectoryError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            DirectoryError::Auth(format!(
                "cannot read service account key {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }

    /// Either the inline JSON document or a path to it.
    pub fn load(credentials: &str) -> Result<Self, DirectoryError> {
        if credentials.trim_start().starts_with('{') {
            Self::from_json(credentials)
        } else {
            Self::from_file(Path::new(credentials))
        }
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    pub iss: &'a str,
    pub sub: &'a str,
    pub scope: &'a str,
    pub aud: &'a str,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// JWT-bearer token source for a delegated service account.
pub struct ServiceAccountTokenSource {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    subject: String,
    scope: String,
    agent: ureq::Agent,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    /// Token source impersonating `subject` (the directory admin).
    pub fn new(
        key: ServiceAccountKey,
        subject: impl Into<String>,
    ) -> Result<Self, DirectoryError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            DirectoryError::Auth(format!("invalid service account private key: {e}"))
        })?;
        Ok(Self {
            key,
            encoding_key,
            subject: subject.into(),
            scope: DIRECTORY_USER_SCOPE.to_owned(),
            agent: ureq::AgentBuilder::new().build(),
            cached: Mutex::new(None),
        })
    }

    fn claims(&self, now: u64) -> AssertionClaims<'_> {
        AssertionClaims {
            iss: &self.key.client_email,
            sub: &self.subject,
            scope: &self.scope,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        }
    }

    fn assertion(&self) -> Result<String, DirectoryError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| DirectoryError::Auth(format!("system clock error: {e}")))?
            .as_secs();
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        encode(&header, &self.claims(now), &self.encoding_key)
            .map_err(|e| DirectoryError::Auth(format!("failed to sign assertion: {e}")))
    }

    fn exchange(&self) -> Result<CachedToken, DirectoryError> {
        let assertion = self.assertion()?;
        tracing::debug!(subject = %self.subject, "requesting directory access token");
        let response = match self
            .agent
            .post(&self.key.token_uri)
            .send_form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(DirectoryError::Auth(format!(
                    "token endpoint returned {code}: {body}"
                )));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(DirectoryError::Auth(format!("token endpoint unreachable: {err}")));
            }
        };
        let body = response
            .into_string()
            .map_err(|e| DirectoryError::Auth(format!("failed to read token response: {e}")))?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| DirectoryError::Auth(format!("invalid token response: {e}")))?;
        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}

impl TokenSource for ServiceAccountTokenSource {
    fn access_token(&self) -> Result<String, DirectoryError> {
        let mut cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = cached.as_ref() {
            if Instant::now() + EXPIRY_GRACE < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }
        let token = self.exchange()?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }
}
