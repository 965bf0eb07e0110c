//! EduThreat -- dashboard core for cyber-incident intelligence in the
//! education sector.
//!
//! This crate provides the classification, filtering, and aggregation layer
//! over an external incident feed, plus the API server that re-serves the
//! shaped data to the browser shell. All data originates upstream; the core
//! is a pure transformation layer over immutable snapshots.

pub mod analytics;
pub mod api;
pub mod config;
pub mod feed;
pub mod incident;
pub mod query;
pub mod taxonomy;
pub mod view;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::api::state::AppState;
use crate::config::DashboardConfig;
use crate::feed::FeedClient;

/// Start the dashboard daemon: API server plus the background refresh of
/// the landing-view bundle.
pub async fn serve(config: DashboardConfig) -> Result<()> {
    let feed = FeedClient::new(
        &config.upstream.base_url,
        Duration::from_secs(config.upstream.timeout_sec),
    )?;
    let state = AppState::new(Arc::new(feed), config.server.per_page);

    let refresh_state = state.clone();
    let interval = Duration::from_secs(config.server.refresh_interval_sec.max(1));
    tokio::spawn(async move {
        run_refresh_loop(refresh_state, interval).await;
    });

    let addr: std::net::SocketAddr = config.server.bind.parse()?;
    let app = api::router(state);

    tracing::info!(%addr, upstream = %config.upstream.base_url, "eduthreat dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_refresh_loop(state: AppState, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        refresh_dashboard(&state).await;
    }
}

/// One refresh cycle. The generation guard makes this last-write-wins: a
/// slow fetch that was superseded while in flight is discarded.
async fn refresh_dashboard(state: &AppState) {
    let generation = state.dashboard.begin();
    match state.feed.dashboard().await {
        Ok(bundle) => {
            let total = bundle.stats.total_incidents;
            if state.dashboard.commit(generation, bundle) {
                tracing::debug!(total_incidents = total, "dashboard bundle refreshed");
            } else {
                tracing::debug!("dashboard refresh superseded, result discarded");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "dashboard refresh failed, keeping previous bundle");
        }
    }
}
