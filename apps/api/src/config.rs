use anyhow::{anyhow, Context, Result};

use crate::screening::{MatchMode, ScoringPolicy};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SMTP_PORT: u16 = 587;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub upload_dir: String,
    pub max_upload_bytes: usize,
    /// Uploads go to S3 when set, otherwise to `upload_dir`.
    pub s3: Option<S3Config>,
    /// Notifications are only logged when unset.
    pub smtp: Option<SmtpConfig>,
    pub match_mode: MatchMode,
    pub scoring_policy: ScoringPolicy,
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub sender: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("sender", &self.sender)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| anyhow!("Required environment variable '{key}' is not set"))
        };

        let s3 = match get("S3_BUCKET") {
            Some(bucket) => Some(S3Config {
                bucket,
                endpoint: get("S3_ENDPOINT"),
                region: get("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key_id: require("AWS_ACCESS_KEY_ID")?,
                secret_access_key: require("AWS_SECRET_ACCESS_KEY")?,
            }),
            None => None,
        };

        let smtp = match get("SMTP_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                port: get("SMTP_PORT")
                    .map(|v| v.parse::<u16>())
                    .transpose()
                    .context("SMTP_PORT must be a valid port number")?
                    .unwrap_or(DEFAULT_SMTP_PORT),
                username: require("SMTP_USERNAME")?,
                password: require("SMTP_PASSWORD")?,
                sender: require("SENDER_EMAIL")?,
            }),
            None => None,
        };

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            upload_dir: get("UPLOAD_DIR").unwrap_or_else(|| "uploads".to_string()),
            max_upload_bytes: get("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            s3,
            smtp,
            match_mode: get("SKILL_MATCH_MODE")
                .map(|v| v.parse::<MatchMode>())
                .transpose()
                .map_err(|e| anyhow!(e))?
                .unwrap_or_default(),
            scoring_policy: get("SCORING_POLICY")
                .map(|v| v.parse::<ScoringPolicy>())
                .transpose()
                .map_err(|e| anyhow!(e))?
                .unwrap_or_default(),
        })
    }
}
