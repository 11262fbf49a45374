use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
};

use crate::config::ServerConfig;
use crate::executor::ConnectionPool;
use crate::feed::RealtyFeedClient;
use crate::schema_descriptor::SchemaDescriptor;
use crate::search::SearchOrchestrator;
use crate::translator::{GeminiClient, QueryTranslator};

pub mod handlers;
pub mod models;

use handlers::{health_check, search_handler};

pub struct AppState {
    pub orchestrator: SearchOrchestrator,
    pub config: ServerConfig,
}

pub fn build_router(app_state: Arc<AppState>) -> Router {
    // Browser frontends call this API directly; the CORS layer also answers
    // OPTIONS preflights.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health_check))
        .route("/search", post(search_handler))
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(60)))
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .layer(CatchPanicLayer::new())
        .with_state(app_state)
}

pub async fn run_with_config(config: ServerConfig) {
    log::info!(
        "Server configuration: http={}:{}, model={}",
        config.http_host,
        config.http_port,
        config.gemini_model
    );

    // One outbound HTTP client shared by the LLM and feed collaborators;
    // each applies its own per-request timeout.
    let http = reqwest::Client::new();

    let pool = Arc::new(ConnectionPool::new(&config));
    let completion = Arc::new(GeminiClient::new(http.clone(), &config));
    let feed = Arc::new(RealtyFeedClient::new(http, &config));
    let translator = QueryTranslator::new(completion, SchemaDescriptor::default());
    let orchestrator = SearchOrchestrator::new(translator, pool, feed);

    let app_state = Arc::new(AppState {
        orchestrator,
        config: config.clone(),
    });
    let app = build_router(app_state);

    let bind_address = format!("{}:{}", config.http_host, config.http_port);
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => {
            log::info!("Successfully bound HTTP listener to {}", bind_address);
            listener
        }
        Err(e) => {
            log::error!("Failed to bind HTTP listener to {}: {}", bind_address, e);
            log::error!("Is another process using port {}?", config.http_port);
            std::process::exit(1);
        }
    };

    println!("Propsearch server is running");
    println!("  HTTP API: http://{}", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("HTTP server fatal error: {:?}", e);
        std::process::exit(1);
    }
}
