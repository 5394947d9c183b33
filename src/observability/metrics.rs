//! Metrics collection.
//!
//! # Metrics
//! - `mpc_sdk_requests_total` (counter): requests by method, outcome
//! - `mpc_sdk_request_duration_seconds` (histogram): latency by method
//! - `mpc_sdk_token_exchanges_total` (counter): credential exchanges by outcome
//! - `mpc_sdk_reauthentications_total` (counter): retries after a rejected token

use std::time::Duration;

use crate::error::SdkError;

/// Label value describing how a request ended.
pub fn outcome_label<T>(result: &Result<T, SdkError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(SdkError::Configuration(_)) => "configuration_error",
        Err(SdkError::Authentication { .. }) => "authentication_error",
        Err(SdkError::Transport(_)) => "transport_error",
        Err(SdkError::Protocol(_)) => "protocol_error",
        Err(SdkError::Api { .. }) => "api_error",
    }
}

pub fn record_request(method: &str, outcome: &'static str, elapsed: Duration) {
    metrics::counter!(
        "mpc_sdk_requests_total",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("mpc_sdk_request_duration_seconds", "method" => method.to_string())
        .record(elapsed.as_secs_f64());
}

pub fn record_token_exchange(outcome: &'static str) {
    metrics::counter!("mpc_sdk_token_exchanges_total", "outcome" => outcome).increment(1);
}

pub fn record_reauthentication() {
    metrics::counter!("mpc_sdk_reauthentications_total").increment(1);
}
