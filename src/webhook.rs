// HTTP listener: the /sonar kill-report webhook plus health and metrics
// endpoints. Reports carry exact kill times, so the store is written with
// `now` here, unlike the button path's forward sentinel.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tower_http::cors::CorsLayer;

use crate::catalog::{Rank, World};
use crate::metrics;
use crate::store::{StoreError, TimerStore};

// ── Shared application state ─────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub store: TimerStore,
    /// Render worker inbox. Closed when the bot subsystem is disabled;
    /// sends are then no-ops.
    pub refresh: UnboundedSender<World>,
}

// ── Error helper ──────────────────────────────────────────────────────

fn json_error(status: StatusCode, msg: &str) -> impl IntoResponse {
    (status, Json(json!({ "error": msg })))
}

// ── Router ────────────────────────────────────────────────────────────

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sonar", post(sonar))
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "huntboard" }))
}

async fn get_metrics() -> String {
    metrics::gather_metrics()
}

// ── Kill reports ──────────────────────────────────────────────────────

/// Inbound spawn-report payload. Fields are validated by hand so the
/// response can say which one was missing or wrong.
#[derive(Debug, Deserialize)]
pub struct SonarReport {
    pub world: Option<String>,
    pub rank: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("missing world")]
    MissingWorld,
    #[error("missing rank")]
    MissingRank,
    #[error("unknown world '{0}'")]
    UnknownWorld(String),
    #[error("world '{0}' is not tracked")]
    UntrackedWorld(String),
    #[error("unknown rank '{0}'")]
    UnknownRank(String),
}

/// Validate a report and record the kill at exactly `now`. Any error
/// leaves the store untouched.
pub fn apply_report(
    store: &TimerStore,
    report: &SonarReport,
    now: DateTime<Utc>,
) -> Result<World, ReportError> {
    let world_name = report.world.as_deref().ok_or(ReportError::MissingWorld)?;
    let rank_name = report.rank.as_deref().ok_or(ReportError::MissingRank)?;

    let world = World::from_name(world_name)
        .ok_or_else(|| ReportError::UnknownWorld(world_name.to_string()))?;
    let rank = Rank::from_name(rank_name)
        .ok_or_else(|| ReportError::UnknownRank(rank_name.to_string()))?;

    store.report_kill(world, rank, now).map_err(|e| match e {
        StoreError::UntrackedWorld(_) => ReportError::UntrackedWorld(world_name.to_string()),
    })?;
    Ok(world)
}

async fn sonar(State(state): State<AppState>, Json(report): Json<SonarReport>) -> impl IntoResponse {
    match apply_report(&state.store, &report, Utc::now()) {
        Ok(world) => {
            tracing::info!("sonar report: kill recorded on {world}");
            let _ = state.refresh.send(world);
            metrics::WEBHOOK_REQUESTS_TOTAL.with_label_values(&["200"]).inc();
            (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
        }
        Err(e) => {
            tracing::warn!("sonar report rejected: {e}");
            metrics::WEBHOOK_REQUESTS_TOTAL.with_label_values(&["400"]).inc();
            json_error(StatusCode::BAD_REQUEST, &e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kill_mark_offset;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn report(world: Option<&str>, rank: Option<&str>) -> SonarReport {
        SonarReport {
            world: world.map(str::to_string),
            rank: rank.map(str::to_string),
        }
    }

    #[test]
    fn test_report_sets_exact_kill_time() {
        let now = fixed_now();
        let store = TimerStore::new(&[World::Halicarnassus], now);

        let world = apply_report(
            &store,
            &report(Some("halicarnassus"), Some("queen hawk")),
            now,
        )
        .unwrap();

        assert_eq!(world, World::Halicarnassus);
        assert_eq!(
            store.last_killed(World::Halicarnassus, Rank::QueenHawk),
            Some(now)
        );
    }

    #[test]
    fn test_missing_fields() {
        let now = fixed_now();
        let store = TimerStore::new(&[World::Halicarnassus], now);

        assert_eq!(
            apply_report(&store, &report(None, Some("Queen Hawk")), now),
            Err(ReportError::MissingWorld)
        );
        assert_eq!(
            apply_report(&store, &report(Some("Halicarnassus"), None), now),
            Err(ReportError::MissingRank)
        );
    }

    #[test]
    fn test_unknown_names_leave_store_untouched() {
        let now = fixed_now();
        let store = TimerStore::new(&[World::Halicarnassus], now);

        assert_eq!(
            apply_report(&store, &report(Some("Ultros"), Some("Queen Hawk")), now),
            Err(ReportError::UnknownWorld("Ultros".to_string()))
        );
        assert_eq!(
            apply_report(&store, &report(Some("Halicarnassus"), Some("Odin")), now),
            Err(ReportError::UnknownRank("Odin".to_string()))
        );

        // Placeholder timestamps survive every rejected report
        for rank in Rank::ALL {
            assert_eq!(
                store.last_killed(World::Halicarnassus, rank),
                Some(now + kill_mark_offset())
            );
        }
    }

    #[test]
    fn test_untracked_world_rejected() {
        let now = fixed_now();
        let store = TimerStore::new(&[World::Halicarnassus], now);

        assert_eq!(
            apply_report(&store, &report(Some("Maduin"), Some("Queen Hawk")), now),
            Err(ReportError::UntrackedWorld("Maduin".to_string()))
        );
    }
}
