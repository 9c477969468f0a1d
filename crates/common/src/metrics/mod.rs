//! Prometheus metrics for the feed pipeline.
//!
//! Both binaries call `register_metrics` at startup and, when a metrics
//! port is configured, `install_exporter` to serve the scrape endpoint.
//! Recording helpers live here so the pipeline crate never touches metric
//! names directly.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};
use std::net::SocketAddr;

/// Prefix for all NewsForge metrics
pub const METRICS_PREFIX: &str = "newsforge";

/// Buckets for upstream calls (feed fetches, LLM completions), in seconds
pub const UPSTREAM_BUCKETS: &[f64] = &[
    0.100, 0.250, 0.500, 1.000, 2.000, 5.000, 10.00, 30.00, 60.00,
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_producer_runs_total", METRICS_PREFIX),
        Unit::Count,
        "Total producer feed runs"
    );

    describe_histogram!(
        format!("{}_producer_run_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Producer run latency in seconds"
    );

    describe_counter!(
        format!("{}_articles_queued_total", METRICS_PREFIX),
        Unit::Count,
        "Total articles enqueued from feeds"
    );

    describe_gauge!(
        format!("{}_queue_depth", METRICS_PREFIX),
        Unit::Count,
        "Number of waiting queue items"
    );

    describe_counter!(
        format!("{}_queue_items_processed_total", METRICS_PREFIX),
        Unit::Count,
        "Total queue items processed"
    );

    describe_counter!(
        format!("{}_queue_items_failed_total", METRICS_PREFIX),
        Unit::Count,
        "Total queue item processing failures"
    );

    describe_counter!(
        format!("{}_llm_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total LLM completion requests"
    );

    describe_histogram!(
        format!("{}_llm_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "LLM completion latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Install the Prometheus recorder with a scrape listener on `port`
pub fn install_exporter(port: u16) -> Result<SocketAddr, BuildError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(
            Matcher::Full(format!("{}_producer_run_duration_seconds", METRICS_PREFIX)),
            UPSTREAM_BUCKETS,
        )?
        .set_buckets_for_metric(
            Matcher::Full(format!("{}_llm_duration_seconds", METRICS_PREFIX)),
            UPSTREAM_BUCKETS,
        )?
        .install()?;

    Ok(addr)
}

/// Record a producer feed run
pub fn record_producer_run(duration_secs: f64, success: bool, articles_queued: usize) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_producer_runs_total", METRICS_PREFIX),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(format!("{}_producer_run_duration_seconds", METRICS_PREFIX)).record(duration_secs);

    if articles_queued > 0 {
        counter!(format!("{}_articles_queued_total", METRICS_PREFIX))
            .increment(articles_queued as u64);
    }
}

/// Record a queue item processing outcome
pub fn record_queue_item(success: bool) {
    if success {
        counter!(format!("{}_queue_items_processed_total", METRICS_PREFIX)).increment(1);
    } else {
        counter!(format!("{}_queue_items_failed_total", METRICS_PREFIX)).increment(1);
    }
}

/// Set the current waiting queue depth
pub fn record_queue_depth(waiting: u64) {
    gauge!(format!("{}_queue_depth", METRICS_PREFIX)).set(waiting as f64);
}

/// Record an LLM completion request
pub fn record_llm_request(duration_secs: f64, model: &str, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_llm_requests_total", METRICS_PREFIX),
        "model" => model.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    if success {
        histogram!(
            format!("{}_llm_duration_seconds", METRICS_PREFIX),
            "model" => model.to_string()
        )
        .record(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_buckets_sorted() {
        let mut prev = 0.0;
        for &bucket in UPSTREAM_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        // With no recorder installed these must not panic
        record_producer_run(1.5, true, 3);
        record_queue_item(false);
        record_queue_depth(7);
        record_llm_request(2.0, "mock-rewriter", true);
    }
}
