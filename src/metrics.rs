// Prometheus metrics definitions for the huntboard service.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ── Gauges ───────────────────────────────────────────────────────

    /// Boards currently registered with the render worker.
    pub static ref TRACKED_BOARDS: IntGauge =
        IntGauge::new("huntboard_tracked_boards", "Boards currently tracked").unwrap();

    // ── Counters ─────────────────────────────────────────────────────

    /// Timer writes, by store operation (mark, report, offset).
    pub static ref TIMER_WRITES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("huntboard_timer_writes_total", "Timer writes"),
        &["op"],
    )
    .unwrap();

    /// Board renders pushed to the chat platform, by trigger (tick, request, interaction).
    pub static ref BOARD_REFRESHES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("huntboard_board_refreshes_total", "Board renders delivered"),
        &["trigger"],
    )
    .unwrap();

    /// Board renders that failed to deliver.
    pub static ref BOARD_REFRESH_ERRORS_TOTAL: IntCounter = IntCounter::new(
        "huntboard_board_refresh_errors_total",
        "Board renders that failed to deliver",
    )
    .unwrap();

    /// Commands rejected with a user-facing error.
    pub static ref COMMAND_ERRORS_TOTAL: IntCounter = IntCounter::new(
        "huntboard_command_errors_total",
        "Commands rejected with a user-facing error",
    )
    .unwrap();

    /// Webhook kill reports, by response status.
    pub static ref WEBHOOK_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("huntboard_webhook_requests_total", "Webhook kill reports"),
        &["status"],
    )
    .unwrap();
}

/// Register all metrics with the custom registry. Call once at startup.
pub fn register_metrics() {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TRACKED_BOARDS.clone()),
        Box::new(TIMER_WRITES_TOTAL.clone()),
        Box::new(BOARD_REFRESHES_TOTAL.clone()),
        Box::new(BOARD_REFRESH_ERRORS_TOTAL.clone()),
        Box::new(COMMAND_ERRORS_TOTAL.clone()),
        Box::new(WEBHOOK_REQUESTS_TOTAL.clone()),
    ];

    for c in collectors {
        REGISTRY.register(c).expect("failed to register metric");
    }
}

/// Serialize all registered metrics to the Prometheus text exposition format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_metrics_returns_string() {
        register_metrics();
        let output = gather_metrics();
        assert!(output.is_empty() || output.contains("huntboard_"));
    }

    #[test]
    fn test_metric_increments() {
        TRACKED_BOARDS.set(8);
        assert_eq!(TRACKED_BOARDS.get(), 8);
        TRACKED_BOARDS.set(0);

        TIMER_WRITES_TOTAL.with_label_values(&["mark"]).inc();
        BOARD_REFRESHES_TOTAL.with_label_values(&["tick"]).inc();
        BOARD_REFRESH_ERRORS_TOTAL.inc();
        COMMAND_ERRORS_TOTAL.inc();
        WEBHOOK_REQUESTS_TOTAL.with_label_values(&["200"]).inc();
    }
}
