//! NewsForge Admin API Gateway
//!
//! The entry point for all administrative requests:
//! - Category, producer, queue, and article management
//! - Manual "run now" / "process now" triggers
//! - Feed analysis for source setup
//! - Observability (logging, metrics, tracing)

mod handlers;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use newsforge_common::{config::AppConfig, db::DbPool, llm, metrics};
use newsforge_feed::FeedFetcher;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub fetcher: FeedFetcher,
    pub rewriter: Arc<dyn newsforge_common::Rewriter>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Arc::new(AppConfig::load()?);
    init_tracing(&config);

    info!("Starting NewsForge Gateway v{}", newsforge_common::VERSION);

    // Initialize metrics
    metrics::register_metrics();
    if config.observability.metrics_port > 0 {
        let metrics_addr = metrics::install_exporter(config.observability.metrics_port)?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }

    info!("Connecting to database...");
    let db = DbPool::new(&config.database).await?;

    let fetcher = FeedFetcher::new(
        config.fetch.timeout_secs,
        &config.fetch.user_agent,
        config.fetch.max_articles,
    )?;
    let rewriter = llm::create_rewriter(&config.llm)?;
    info!(model = %rewriter.model_name(), "Rewriter initialized");

    let app = create_router(AppState {
        config: config.clone(),
        db,
        fetcher,
        rewriter,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Set up the subscriber from the observability section, with `RUST_LOG`
/// taking precedence over the configured level
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if config.observability.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Assemble the `/v1` router with tracing, CORS, and request-id layers
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();
    let timeout = TimeoutLayer::new(state.config.request_timeout());

    let api_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Feed analysis (pre-creation source check)
        .route("/feeds/analyze", post(handlers::feeds::analyze_feed))
        // Category endpoints
        .route("/categories", post(handlers::categories::create_category))
        .route("/categories", get(handlers::categories::list_categories))
        .route("/categories/{id}", get(handlers::categories::get_category))
        .route("/categories/{id}", patch(handlers::categories::update_category))
        // Producer endpoints
        .route("/producers", post(handlers::producers::create_producer))
        .route("/producers", get(handlers::producers::list_producers))
        .route("/producers/{id}", get(handlers::producers::get_producer))
        .route("/producers/{id}", patch(handlers::producers::update_producer))
        .route("/producers/{id}", delete(handlers::producers::delete_producer))
        .route("/producers/{id}/toggle", post(handlers::producers::toggle_producer))
        .route("/producers/{id}/run", post(handlers::producers::run_producer))
        // Queue endpoints
        .route("/queue", get(handlers::queue::list_queue))
        .route("/queue/search", get(handlers::queue::search_queue))
        .route("/queue/stats", get(handlers::queue::queue_stats))
        .route("/queue/bulk-delete", post(handlers::queue::bulk_delete))
        .route("/queue/dedup", post(handlers::queue::plan_dedup))
        .route("/queue/{id}", delete(handlers::queue::delete_queue_item))
        .route("/queue/{id}/process", post(handlers::queue::process_queue_item))
        // Article endpoints
        .route("/articles", get(handlers::articles::list_articles))
        .route("/articles/{id}", get(handlers::articles::get_article))
        .route("/articles/{id}", patch(handlers::articles::update_article))
        .route("/articles/{id}", delete(handlers::articles::delete_article))
        .route("/articles/{id}/view", post(handlers::articles::record_view));

    Router::new()
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(timeout)
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Resolve when either Ctrl+C or SIGTERM arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, shutting down..."),
        _ = terminate => info!("SIGTERM received, shutting down..."),
    }
}
