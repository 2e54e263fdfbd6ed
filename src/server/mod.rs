use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use crate::storage::SqliteStore;

pub mod routes;

/// Server state
///
/// rusqlite's `Connection` is `!Sync`, so the store sits behind an async
/// mutex and handlers await the lock instead of blocking the runtime.
pub struct AppState {
    pub store: Mutex<SqliteStore>,
}

pub async fn start_server(port: u16, database_path: PathBuf) -> anyhow::Result<()> {
    let store = SqliteStore::open(&database_path)?;
    let state = Arc::new(AppState {
        store: Mutex::new(store),
    });

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/customers",
            get(routes::list_customers).post(routes::create_customer),
        )
        .route(
            "/api/customers/{id}",
            get(routes::get_customer)
                .put(routes::update_customer)
                .delete(routes::delete_customer),
        )
        .route(
            "/api/addresses/customer/{customer_id}",
            get(routes::list_addresses),
        )
        .route("/api/addresses", post(routes::create_address))
        .route(
            "/api/addresses/{id}",
            put(routes::update_address).delete(routes::delete_address),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
