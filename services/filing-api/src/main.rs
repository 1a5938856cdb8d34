use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    response::Json,
    routing::get,
    serve, Router,
};
use gstflow_utils::{init_logging, AppConfig};
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

mod advisor;
mod engine;
mod handlers;
mod knowledge;
mod middleware;
mod planner;
mod routes;
mod store;

use advisor::Advisor;
use knowledge::KnowledgeRetriever;
use middleware::request_id_middleware;
use planner::DocumentRenderer;
use store::FilingStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|_| {
        eprintln!("Failed to load configuration, using defaults");
        AppConfig::default()
    });

    // Initialize logging
    init_logging(&config.logging)?;
    info!("Starting GSTFlow filing API");

    // The corpus is indexed once before any request is served and is
    // read-only afterward.
    let retriever = Arc::new(KnowledgeRetriever::new(knowledge::build_corpus(
        config.knowledge.directory.as_deref(),
    )));
    info!(documents = retriever.len(), "Knowledge corpus indexed");

    let advisor = Arc::new(Advisor::from_config(&config.advisor)?);
    info!("Advisory text generator: {}", advisor.describe());

    let app = create_app(&config, retriever, advisor);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    info!("Filing API listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

fn create_app(
    config: &AppConfig,
    retriever: Arc<KnowledgeRetriever>,
    advisor: Arc<Advisor>,
) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        // API routes
        .nest("/api/v1", routes::create_api_routes())
        // Middleware stack
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(DefaultBodyLimit::max(config.server.max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        // Application state
        .with_state(AppState {
            store: FilingStore::new(),
            retriever,
            advisor,
            documents: Arc::new(DocumentRenderer::new()),
            config: config.clone(),
        })
}

#[derive(Clone)]
pub struct AppState {
    pub store: FilingStore,
    pub retriever: Arc<KnowledgeRetriever>,
    pub advisor: Arc<Advisor>,
    pub documents: Arc<DocumentRenderer>,
    pub config: AppConfig,
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "gstflow-filing-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics_handler() -> String {
    use prometheus::TextEncoder;

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_else(|_| "Error encoding metrics".to_string())
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    AppState {
        store: FilingStore::new(),
        retriever: Arc::new(KnowledgeRetriever::new(knowledge::corpus::builtin_documents())),
        advisor: Arc::new(Advisor::Template(advisor::TemplateAdvisor::new())),
        documents: Arc::new(DocumentRenderer::new()),
        config: AppConfig::default(),
    }
}
