use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Jira credentials are optional — when absent the mock project tracker is used.
    pub jira: Option<JiraConfig>,
}

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub user_email: String,
    pub api_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            jira: jira_from_env(),
        })
    }
}

fn jira_from_env() -> Option<JiraConfig> {
    let base_url = std::env::var("JIRA_BASE_URL").ok()?;
    let user_email = std::env::var("JIRA_USER_EMAIL").ok()?;
    let api_token = std::env::var("JIRA_API_TOKEN").ok()?;
    Some(JiraConfig {
        base_url,
        user_email,
        api_token,
    })
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
