//! Remote analytics snapshot client
//!
//! The site can consume a remote analytics endpoint (a thin proxy over the
//! hosted analytics property) exposing a single `GET` that answers either
//! live numbers or a payload with an `error` field. Failures here are never
//! fatal: every problem degrades to a fixed placeholder snapshot plus a
//! `degraded` flag for the consumer to surface as a subdued notice.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wire format of the analytics endpoint (camelCase on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub current_visitors: u64,
    #[serde(default)]
    pub total_visitors: u64,
    #[serde(default)]
    pub today_visitors: u64,
    #[serde(default)]
    pub page_views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Fixed placeholder numbers used when the live source is unavailable.
pub fn fallback_snapshot() -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        current_visitors: 5,
        total_visitors: 1250,
        today_visitors: 45,
        page_views: 3200,
        error: None,
    }
}

/// A snapshot plus whether it came from the fallback path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsView {
    pub snapshot: AnalyticsSnapshot,
    /// True when the live fetch failed and placeholder numbers are shown
    pub degraded: bool,
}

/// HTTP client for the analytics endpoint.
pub struct AnalyticsClient {
    endpoint: String,
    http: reqwest::Client,
}

impl AnalyticsClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    /// Fetch the live snapshot. Never returns an error: transport failures,
    /// bad payloads, and endpoint-reported errors all yield the fallback
    /// snapshot with `degraded` set.
    pub async fn fetch(&self) -> AnalyticsView {
        match self.try_fetch().await {
            Ok(snapshot) if snapshot.error.is_none() => AnalyticsView {
                snapshot,
                degraded: false,
            },
            Ok(snapshot) => {
                tracing::warn!(
                    "Analytics endpoint reported an error: {:?}",
                    snapshot.error
                );
                AnalyticsView {
                    snapshot: fallback_snapshot(),
                    degraded: true,
                }
            }
            Err(e) => {
                tracing::warn!("Analytics fetch failed: {}", e);
                AnalyticsView {
                    snapshot: fallback_snapshot(),
                    degraded: true,
                }
            }
        }
    }

    async fn try_fetch(&self) -> anyhow::Result<AnalyticsSnapshot> {
        let response = self.http.get(&self.endpoint).send().await?;
        Ok(response.json().await?)
    }
}
