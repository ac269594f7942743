//! Preview server
//!
//! Serves the generated site and exposes the small analytics API the pages
//! consume: `GET /api/analytics` answers the local visitor counters and
//! `POST /api/track` records a pageview. Both stay on HTTP 200 even when
//! the store fails, answering the fallback payload instead, so the
//! consuming widget never breaks on an error status.

use anyhow::Result;
use axum::{extract::State, routing::get, routing::post, Json, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower_http::services::ServeDir;

use crate::analytics::AnalyticsSnapshot;
use crate::stats::{FileStore, VisitorTracker};
use crate::Blog;

struct ServerState {
    tracker: Mutex<VisitorTracker<FileStore>>,
}

/// Start the preview server.
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let store = FileStore::open(blog.stats_path())?;
    let state = Arc::new(ServerState {
        tracker: Mutex::new(VisitorTracker::new(store)),
    });

    let app = Router::new()
        .route("/api/analytics", get(analytics_handler))
        .route("/api/track", post(track_handler))
        .fallback_service(ServeDir::new(&blog.public_dir))
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!(
        "Serving {:?} at http://{}:{}",
        blog.public_dir,
        bind_ip,
        port
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn analytics_handler(State(state): State<Arc<ServerState>>) -> Json<AnalyticsSnapshot> {
    let tracker = match state.tracker.lock() {
        Ok(tracker) => tracker,
        Err(_) => return Json(error_snapshot()),
    };

    let stats = tracker.stats();
    Json(AnalyticsSnapshot {
        // Local counters have no realtime dimension
        current_visitors: 0,
        total_visitors: stats.total_visitors,
        today_visitors: stats.today_visitors,
        page_views: stats.page_views,
        error: None,
    })
}

#[derive(Debug, Deserialize)]
struct TrackRequest {
    path: String,
}

#[derive(Debug, serde::Serialize)]
struct TrackResponse {
    path: String,
    views: u64,
}

async fn track_handler(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<TrackRequest>,
) -> Json<TrackResponse> {
    let views = match state.tracker.lock() {
        Ok(mut tracker) => {
            tracker.record_page_view(&req.path);
            tracker.page_views(&req.path)
        }
        Err(_) => 0,
    };

    Json(TrackResponse {
        path: req.path,
        views,
    })
}

/// Zeroed payload with an error field, HTTP 200.
fn error_snapshot() -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        current_visitors: 0,
        total_visitors: 0,
        today_visitors: 0,
        page_views: 0,
        error: Some("Failed to read visitor statistics".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_snapshot_serializes_with_error_field() {
        let raw = serde_json::to_string(&error_snapshot()).unwrap();
        assert!(raw.contains("\"error\""));
        assert!(raw.contains("\"totalVisitors\":0"));
    }
}
