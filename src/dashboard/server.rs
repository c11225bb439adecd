use anyhow::Context;
use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;

use super::routes;
use super::state::DashboardState;

pub fn build_router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/", get(routes::index).post(routes::run_action))
        .route("/api/status", get(routes::get_status))
        .with_state(state)
}

/// Serve the page on an already bound listener.
pub async fn serve(listener: TcpListener, state: Arc<DashboardState>) -> anyhow::Result<()> {
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

/// Bind `addr` and serve the page until the process ends.
pub async fn start_dashboard(state: Arc<DashboardState>, addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind web page on {}", addr))?;
    serve(listener, state).await
}
