pub mod handlers;
pub mod types;

use crate::{
    Result,
    advisor::MedicineAdvisor,
    app::Controller,
    config::Config,
    llm::GeminiClient,
    quota::{KeyValueStore, LibsqlStore, MemoryStore, QuotaTracker, SystemClock},
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::ServerState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/medicine", post(handlers::submit_medicine))
        .route("/api/state", get(handlers::get_state))
        .route("/api/result", get(handlers::get_result))
        .route("/api/quota", get(handlers::get_quota))
        .route("/api/quota/dismiss", post(handlers::dismiss_quota_modal))
        .route("/api/subscribe", post(handlers::subscribe))
        .route("/api/languages", get(handlers::languages))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn open_quota_store(db_path: &str) -> Arc<dyn KeyValueStore> {
    match LibsqlStore::new(db_path).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                "Quota store initialization failed, using in-memory fallback: {}",
                e
            );
            Arc::new(MemoryStore::new())
        }
    }
}

pub async fn run(config: Config) -> Result<()> {
    let store = open_quota_store(&config.server.database_path).await;
    let quota = QuotaTracker::new(store, Arc::new(SystemClock));

    let llm_client = GeminiClient::new(config.gemini.clone());
    info!("Using model {}", llm_client.model());
    let advisor = MedicineAdvisor::new(Arc::new(llm_client));

    let state = ServerState {
        controller: Arc::new(Controller::new(advisor, quota)),
    };
    let app = router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
