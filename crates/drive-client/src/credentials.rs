//! Service-account credentials and OAuth token exchange
//!
//! Implements the JWT bearer grant: a claim set is signed with the service
//! account's RSA key and traded for a short-lived access token.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use witness_common::{Error, Result};

/// Read-only Drive scope requested for every token
pub const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

/// Default Google OAuth token endpoint
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The subset of a service-account key file this service needs
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
    DEFAULT_TOKEN_URI.to_string()
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    /// Parse a service-account JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let key: ServiceAccountKey = serde_json::from_str(json)
            .map_err(|e| Error::Credentials(format!("Failed to parse key document: {}", e)))?;

        if key.client_email.trim().is_empty() {
            return Err(Error::Credentials("client_email is empty".to_string()));
        }
        if key.private_key.trim().is_empty() {
            return Err(Error::Credentials("private_key is empty".to_string()));
        }

        Ok(key)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Mints access tokens from a service-account key
pub struct TokenSource {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
}

impl TokenSource {
    /// Create a token source, rejecting keys that are not valid RSA PEM
    pub fn new(key: ServiceAccountKey) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| Error::Credentials(format!("Invalid private key: {}", e)))?;

        Ok(Self { key, encoding_key })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Build the signed JWT assertion for the token request
    fn assertion(&self) -> Result<String> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: DRIVE_READONLY_SCOPE,
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|e| Error::Token(format!("Failed to sign assertion: {}", e)))
    }

    /// Exchange a freshly signed assertion for an access token
    pub async fn fetch_token(&self, http: &reqwest::Client) -> Result<String> {
        let assertion = self.assertion()?;

        debug!("Requesting access token for {}", self.key.client_email);

        let response = http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Token(format!("{}: {}", status, body)));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}
