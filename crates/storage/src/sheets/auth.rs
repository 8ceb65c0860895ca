use std::path::Path;
use std::time::{Duration, Instant};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{Result, StorageError};

const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before Google says they expire
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// The fields we need from a Google service-account JSON key.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            StorageError::Configuration(format!(
                "cannot read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// OAuth2 access tokens for a service account, cached until shortly before expiry.
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    client: Client,
    cached: RwLock<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, client: Client) -> Self {
        Self {
            key,
            client,
            cached: RwLock::new(None),
        }
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Returns a valid access token, exchanging a fresh assertion when needed.
    pub async fn access_token(&self) -> Result<String> {
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref()
                && Instant::now() < token.refresh_at
            {
                return Ok(token.value.clone());
            }
        }

        let mut cached = self.cached.write().await;
        if let Some(token) = cached.as_ref()
            && Instant::now() < token.refresh_at
        {
            return Ok(token.value.clone());
        }

        let token = self.fetch_token().await?;
        let value = token.value.clone();
        *cached = Some(token);

        Ok(value)
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        let assertion = self.sign_assertion(chrono::Utc::now().timestamp())?;

        tracing::debug!(client_email = %self.key.client_email, "Requesting Sheets access token");

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token = response.json::<TokenResponse>().await?;
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(REFRESH_MARGIN);

        Ok(CachedToken {
            value: token.access_token,
            refresh_at: Instant::now() + lifetime,
        })
    }

    fn sign_assertion(&self, issued_at: i64) -> Result<String> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| StorageError::Auth(format!("invalid private key: {}", e)))?;

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| StorageError::Auth(format!("cannot sign assertion: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_JSON: &str = r#"{
        "type": "service_account",
        "project_id": "qr-hunt",
        "client_email": "hunt@qr-hunt.iam.gserviceaccount.com",
        "private_key": "not a pem"
    }"#;

    #[test]
    fn test_key_defaults_token_uri() {
        let key = ServiceAccountKey::from_json(KEY_JSON).unwrap();
        assert_eq!(key.client_email, "hunt@qr-hunt.iam.gserviceaccount.com");
        assert_eq!(key.token_uri, DEFAULT_TOKEN_URI);
    }

    #[test]
    fn test_key_missing_email_is_rejected() {
        let result = ServiceAccountKey::from_json(r#"{"private_key": "x"}"#);
        assert!(matches!(result, Err(StorageError::Json(_))));
    }

    #[test]
    fn test_invalid_private_key_is_auth_error() {
        let key = ServiceAccountKey::from_json(KEY_JSON).unwrap();
        let auth = ServiceAccountAuth::new(key, Client::new());

        assert!(matches!(
            auth.sign_assertion(1_700_000_000),
            Err(StorageError::Auth(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_credentials_file() {
        let result = ServiceAccountKey::from_file("/nonexistent/credentials.json").await;
        assert!(matches!(result, Err(StorageError::Configuration(_))));
    }
}
