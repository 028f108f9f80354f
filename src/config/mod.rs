//! Configuration module for the sync service.
//!
//! All configuration is loaded from environment variables with sensible defaults.
//! Credentials stay optional here; each upstream client reports a missing one as a
//! per-request error.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::AppError;

const DEFAULT_INDEX_NAME: &str = "storyblok_content";
const DEFAULT_STORYBLOK_API_URL: &str = "https://mapi.storyblok.com/v1";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// How the webhook signature header is checked against the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMode {
    /// Header must equal the secret.
    Plain,
    /// Header must be the hex HMAC-SHA256 of the raw body keyed by the secret.
    HmacSha256,
}

impl std::str::FromStr for SignatureMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(SignatureMode::Plain),
            "hmac-sha256" | "hmac" => Ok(SignatureMode::HmacSha256),
            other => Err(AppError::Config(format!(
                "Invalid STORYSEARCH_SIGNATURE_MODE: {}",
                other
            ))),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Search index (Algolia) settings.
#[derive(Debug, Clone)]
pub struct AlgoliaConfig {
    pub app_id: Option<String>,
    pub admin_api_key: Option<String>,
    pub search_key: Option<String>,
    pub index_name: String,
    /// Overrides `https://{app_id}-dsn.algolia.net`
    pub host: Option<String>,
}

/// CMS (Storyblok) settings.
#[derive(Debug, Clone)]
pub struct StoryblokConfig {
    /// Token used by the webhook to fetch the authoritative story
    pub oauth_token: Option<String>,
    /// Token used by the management-API proxy
    pub management_token: Option<String>,
    pub webhook_secret: Option<String>,
    pub api_url: String,
}

/// LLM (OpenAI) settings.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    pub signature_mode: SignatureMode,
    /// Remote analysis endpoint; `None` analyzes in-process
    pub analysis_url: Option<String>,
    pub analysis_token: Option<String>,
    /// Attempts per index write (1 = no retry)
    pub sync_max_attempts: u32,
    pub sync_retry_delay: Duration,
    pub algolia: AlgoliaConfig,
    pub storyblok: StoryblokConfig,
    pub openai: OpenAiConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("STORYSEARCH_BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid STORYSEARCH_BIND_ADDR format: {}", e)))?;

        let log_level = get("STORYSEARCH_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_format = match get("STORYSEARCH_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let signature_mode = match get("STORYSEARCH_SIGNATURE_MODE") {
            Some(mode) => mode.parse()?,
            None => SignatureMode::Plain,
        };

        let sync_max_attempts = match get("STORYSEARCH_SYNC_MAX_ATTEMPTS") {
            Some(v) => v.parse::<u32>().map_err(|e| {
                AppError::Config(format!("Invalid STORYSEARCH_SYNC_MAX_ATTEMPTS: {}", e))
            })?,
            None => 1,
        }
        .max(1);

        let sync_retry_delay = match get("STORYSEARCH_SYNC_RETRY_DELAY_MS") {
            Some(v) => Duration::from_millis(v.parse::<u64>().map_err(|e| {
                AppError::Config(format!("Invalid STORYSEARCH_SYNC_RETRY_DELAY_MS: {}", e))
            })?),
            None => Duration::from_millis(1000),
        };

        Ok(Self {
            bind_addr,
            log_level,
            log_format,
            signature_mode,
            analysis_url: get("STORYSEARCH_ANALYSIS_URL"),
            analysis_token: get("STORYSEARCH_ANALYSIS_TOKEN"),
            sync_max_attempts,
            sync_retry_delay,
            algolia: AlgoliaConfig {
                app_id: get("ALGOLIA_APP_ID"),
                admin_api_key: get("ALGOLIA_ADMIN_API_KEY"),
                search_key: get("ALGOLIA_SEARCH_KEY"),
                index_name: get("ALGOLIA_INDEX_NAME")
                    .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
                host: get("ALGOLIA_HOST"),
            },
            storyblok: StoryblokConfig {
                oauth_token: get("STORYBLOK_OAUTH_TOKEN"),
                management_token: get("STORYBLOK_MANAGEMENT_TOKEN"),
                webhook_secret: get("STORYBLOK_WEBHOOK_SECRET"),
                api_url: get("STORYBLOK_MANAGEMENT_API_URL")
                    .unwrap_or_else(|| DEFAULT_STORYBLOK_API_URL.to_string()),
            },
            openai: OpenAiConfig {
                api_key: get("OPENAI_API_KEY"),
                base_url: get("OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            },
        })
    }
}
