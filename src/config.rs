use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

/// Default listing-feed endpoint: newest-first snapshot of 200 listings.
pub const DEFAULT_FEED_URL: &str =
    "https://api.realtyfeed.com/reso/odata/Property?&$orderby=RFModificationTimestamp desc&$top=200&$count=true";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Server configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host address
    #[validate(length(min = 1, message = "HTTP host cannot be empty"))]
    pub http_host: String,

    /// HTTP server port (1-65535)
    #[validate(range(
        min = 1,
        max = 65535,
        message = "HTTP port must be between 1 and 65535"
    ))]
    pub http_port: u16,

    /// ClickHouse endpoint. Accepts a comma-separated list of URLs for
    /// multi-node deployments; queries round-robin across them.
    #[validate(length(min = 1, message = "ClickHouse URL cannot be empty"))]
    pub clickhouse_url: String,

    /// ClickHouse user (a read-only account is expected; generated SQL is
    /// executed without an allow-list check)
    #[validate(length(min = 1, message = "ClickHouse user cannot be empty"))]
    pub clickhouse_user: String,

    /// ClickHouse password (may be empty for local development)
    pub clickhouse_password: String,

    /// ClickHouse database
    pub clickhouse_database: String,

    /// API key for the Gemini completion service
    pub gemini_api_key: String,

    /// Gemini model used for query translation
    #[validate(length(min = 1, message = "Gemini model cannot be empty"))]
    pub gemini_model: String,

    /// Bound on a single translation call, in seconds
    #[validate(range(
        min = 1,
        max = 600,
        message = "Gemini timeout must be between 1 and 600 seconds"
    ))]
    pub gemini_timeout_secs: u64,

    /// Listing-feed snapshot endpoint (photo source)
    #[validate(length(min = 1, message = "Feed URL cannot be empty"))]
    pub feed_url: String,

    /// Bearer token for the listing feed
    pub feed_token: String,

    /// Bound on a single feed snapshot fetch, in seconds
    #[validate(range(
        min = 1,
        max = 600,
        message = "Feed timeout must be between 1 and 600 seconds"
    ))]
    pub feed_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: "0.0.0.0".to_string(),
            http_port: 8080,
            clickhouse_url: "http://localhost:8123".to_string(),
            clickhouse_user: "default".to_string(),
            clickhouse_password: String::new(),
            clickhouse_database: "default".to_string(),
            gemini_api_key: String::new(),
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_timeout_secs: 30,
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_token: String::new(),
            feed_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            http_host: env::var("PROPSEARCH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: parse_env_var("PROPSEARCH_PORT", "8080")?,
            clickhouse_url: require_env_var("CLICKHOUSE_URL")?,
            clickhouse_user: require_env_var("CLICKHOUSE_USER")?,
            // Allow empty password for local development
            clickhouse_password: env::var("CLICKHOUSE_PASSWORD").unwrap_or_default(),
            clickhouse_database: env::var("CLICKHOUSE_DATABASE")
                .unwrap_or_else(|_| "default".to_string()),
            gemini_api_key: require_env_var("GEMINI_API_KEY")?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            gemini_timeout_secs: parse_env_var("GEMINI_TIMEOUT_SECS", "30")?,
            feed_url: env::var("REALTY_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string()),
            // Missing token degrades to placeholder images, never to a failed search
            feed_token: env::var("REALTY_FEED_TOKEN").unwrap_or_default(),
            feed_timeout_secs: parse_env_var("REALTY_FEED_TIMEOUT_SECS", "10")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Overlay command-line arguments (CLI overrides environment)
    pub fn apply_cli(&mut self, cli: CliConfig) {
        self.http_host = cli.http_host;
        self.http_port = cli.http_port;
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub http_host: String,
    pub http_port: u16,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}

fn require_env_var(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(key)),
    }
}
