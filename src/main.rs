//! StorySearch sync service
//!
//! Receives CMS publish/unpublish/delete webhooks, enriches published stories
//! with derived content metadata and mirrors them into a hosted search index.

mod analysis;
mod api;
mod auth;
mod chat;
mod cms;
mod config;
mod errors;
mod models;
mod search;
mod transform;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chat::ChatClient;
use cms::{CmsApi, StoryblokClient};
use config::{Config, LogFormat};
use search::{AlgoliaIndex, RetryPolicy, SyncDispatcher};
use transform::{ContentAnalyzer, LocalAnalyzer, RemoteAnalyzer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// CMS client holding the webhook fetch token
    pub cms: Arc<dyn CmsApi>,
    /// CMS client holding the management token
    pub cms_proxy: Arc<dyn CmsApi>,
    pub analyzer: Arc<dyn ContentAnalyzer>,
    pub dispatcher: Arc<SyncDispatcher>,
    pub chat: Arc<ChatClient>,
}

impl AppState {
    /// Wire the production clients from configuration.
    pub fn from_config(config: Config, http_client: reqwest::Client) -> Self {
        let storyblok = &config.storyblok;
        let cms = StoryblokClient::new(
            http_client.clone(),
            storyblok.api_url.clone(),
            storyblok.oauth_token.clone(),
            "Storyblok OAuth token",
        );
        let cms_proxy = StoryblokClient::new(
            http_client.clone(),
            storyblok.api_url.clone(),
            storyblok.management_token.clone(),
            "Storyblok Management Token",
        );

        let analyzer: Arc<dyn ContentAnalyzer> = match &config.analysis_url {
            Some(url) => Arc::new(RemoteAnalyzer::new(
                http_client.clone(),
                url.clone(),
                config.analysis_token.clone(),
            )),
            None => Arc::new(LocalAnalyzer),
        };

        let index = AlgoliaIndex::new(http_client.clone(), config.algolia.clone());
        let retry = RetryPolicy::new(config.sync_max_attempts, config.sync_retry_delay);
        let chat = ChatClient::new(http_client, config.openai.clone());

        Self {
            config: Arc::new(config),
            cms: Arc::new(cms),
            cms_proxy: Arc::new(cms_proxy),
            analyzer,
            dispatcher: Arc::new(SyncDispatcher::new(Arc::new(index), retry)),
            chat: Arc::new(chat),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let json = config.log_format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting StorySearch sync service");
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!(
        index = %config.algolia.index_name,
        signature_mode = ?config.signature_mode,
        remote_analysis = config.analysis_url.is_some(),
        sync_max_attempts = config.sync_max_attempts,
        "Sync configuration"
    );

    if config.storyblok.webhook_secret.is_none() {
        tracing::warn!("STORYBLOK_WEBHOOK_SECRET is not set. Webhook deliveries will fail!");
    }
    if config.algolia.search_key.is_some() {
        tracing::info!("ALGOLIA_SEARCH_KEY present");
    }

    let state = AppState::from_config(config.clone(), reqwest::Client::new());

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/storyblok-webhook",
            post(api::storyblok_webhook)
                .fallback(api::method_not_allowed)
                .layer(api::webhook_cors()),
        )
        .route(
            "/ai-content-analysis",
            post(api::analyze_content)
                .fallback(api::method_not_allowed)
                .layer(api::analysis_cors()),
        )
        .route(
            "/storyblok-api",
            post(api::storyblok_api)
                .fallback(api::method_not_allowed)
                .layer(api::client_cors()),
        )
        .route(
            "/ai-chat",
            post(api::ai_chat)
                .fallback(api::method_not_allowed)
                .layer(api::client_cors()),
        )
        // Health check
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
