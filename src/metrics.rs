use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use jaarplan_engine::Calendar;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Fixes the observability switch. Later calls are ignored.
pub fn set_observability_enabled(enabled: bool) {
    let _ = OBSERVABILITY_ENABLED.set(enabled);
}

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true) // Enabled by default
    })
}

/// Initialize Prometheus metrics exporter with upkeep task
/// Returns `Ok(None)` if observability is disabled
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0,
            ],
        )?
        .set_buckets_for_metric(
            Matcher::Full("calendar_recompute_duration_seconds".to_string()),
            &[0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0],
        )?
        .install_recorder()?;

    // Spawn upkeep task to clean stale metrics
    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Metrics middleware to track HTTP requests
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let uri_path = req.uri().path().to_owned();

    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or(uri_path);

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router for metrics server
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

/// Gauges describing the most recent recomputation.
pub fn record_calendar(calendar: &Calendar, revision: u64, duration_secs: f64) {
    if !is_observability_enabled() {
        return;
    }
    gauge!("calendar_revision").set(revision as f64);
    gauge!("calendar_weeks_total").set(calendar.weeks().len() as f64);
    gauge!("calendar_instances_total").set(calendar.instances().len() as f64);
    gauge!("calendar_orphans_total").set(calendar.orphans().len() as f64);
    gauge!("calendar_dropped_total", "kind" => "activity")
        .set(calendar.dropped_activities().len() as f64);
    gauge!("calendar_dropped_total", "kind" => "week").set(calendar.dropped_weeks().len() as f64);
    gauge!("calendar_dropped_total", "kind" => "document")
        .set(calendar.undecodable_documents().len() as f64);
    histogram!("calendar_recompute_duration_seconds").record(duration_secs);
}

/// Counts documents written through the import endpoints.
pub fn track_import(collection: &'static str, documents: usize) {
    if !is_observability_enabled() {
        return;
    }
    counter!("calendar_imports_total", "collection" => collection).increment(1);
    counter!("calendar_imported_documents_total", "collection" => collection)
        .increment(documents as u64);
}
