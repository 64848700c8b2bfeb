//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gate_admissions_total` (counter): evaluations by gate and outcome
//! - `gate_denials_total` (counter): denials by gate and reason
//! - `gate_decision_errors_total` (counter): failed decision calls by gate
//! - `gate_decision_duration_seconds` (histogram): decision call latency
//! - `gateway_requests_total` (counter): forwarded requests by method,
//!   status and upstream
//!
//! # Design Decisions
//! - Low-overhead updates through the `metrics` facade
//! - Prometheus exposition is opt-in via configuration

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                "gate_admissions_total",
                "Admission evaluations by gate and outcome"
            );
            describe_counter!("gate_denials_total", "Denied requests by gate and reason");
            describe_counter!(
                "gate_decision_errors_total",
                "Decision service failures by gate"
            );
            describe_histogram!(
                "gate_decision_duration_seconds",
                "Decision service call latency"
            );
            describe_counter!(
                "gateway_requests_total",
                "Forwarded requests by method, status and upstream"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record a clean allow from the decision service.
pub fn record_allowed(gate: &'static str) {
    counter!("gate_admissions_total", "gate" => gate, "outcome" => "allow").increment(1);
}

/// Record a denial.
pub fn record_denied(gate: &'static str, reason: &'static str) {
    counter!("gate_admissions_total", "gate" => gate, "outcome" => "deny").increment(1);
    counter!("gate_denials_total", "gate" => gate, "reason" => reason).increment(1);
}

/// Record a failed decision call (the request fails open).
pub fn record_decision_error(gate: &'static str) {
    counter!("gate_admissions_total", "gate" => gate, "outcome" => "error").increment(1);
    counter!("gate_decision_errors_total", "gate" => gate).increment(1);
}

/// Record the latency of one decision service call.
pub fn record_decision_latency(gate: &'static str, started: Instant) {
    histogram!("gate_decision_duration_seconds", "gate" => gate)
        .record(started.elapsed().as_secs_f64());
}

/// Record one forwarded request.
pub fn record_request(method: &str, status: u16, upstream: &'static str, started: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "upstream" => upstream
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "upstream" => upstream)
        .record(started.elapsed().as_secs_f64());
}
