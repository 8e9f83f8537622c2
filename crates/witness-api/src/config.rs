//! Configuration management for the Witness API
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use drive_client::{ServiceAccountKey, DEFAULT_DRIVE_API_URL};
use std::env;

/// Variable carrying the service-account JSON document
pub const CREDENTIALS_VAR: &str = "GOOGLE_SERVICE_ACCOUNT_JSON";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Read-only service-account credentials
    pub service_account: ServiceAccountKey,

    /// Container holding one folder per project
    pub root_folder_id: String,

    /// Projects listed by `GET /projects`
    pub projects: Vec<String>,

    /// API server host
    pub api_host: String,

    /// API server port
    pub api_port: u16,

    /// Drive API base URL
    pub drive_api_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = lookup(CREDENTIALS_VAR)
            .filter(|value| !value.trim().is_empty())
            .with_context(|| format!("{} is required", CREDENTIALS_VAR))?;

        let service_account = ServiceAccountKey::from_json(&credentials)
            .with_context(|| format!("Invalid {}", CREDENTIALS_VAR))?;

        let config = Config {
            service_account,

            root_folder_id: lookup("ROOT_FOLDER_ID").unwrap_or_else(|| "root".to_string()),

            projects: parse_projects(&lookup("PROJECTS").unwrap_or_default()),

            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            api_port: lookup("API_PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .context("Invalid API_PORT")?,

            drive_api_url: lookup("DRIVE_API_URL")
                .unwrap_or_else(|| DEFAULT_DRIVE_API_URL.to_string()),
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.api_port == 0 {
            anyhow::bail!("API_PORT must be greater than 0");
        }

        if self.root_folder_id.trim().is_empty() {
            anyhow::bail!("ROOT_FOLDER_ID must not be empty");
        }

        Ok(())
    }

    /// Get the API server address
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

/// Split a comma-separated project list, dropping blanks
fn parse_projects(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
