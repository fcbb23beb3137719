//! Metric names and recording helpers for the relay

use std::time::Instant;

use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram, Meter};

pub const IMAGEGEN_REQUEST_COUNT: &str = "imagegen.request.count";
pub const IMAGEGEN_REQUEST_DURATION: &str = "imagegen.request.duration";

/// Attribute key carrying the request outcome
pub const OUTCOME: &str = "outcome";

/// Instruments recorded once per generate request
///
/// Backed by the global meter provider, so they are no-ops until OTLP
/// metrics export has been initialized.
#[derive(Clone)]
pub struct RelayMetrics {
    requests: Counter<u64>,
    duration: Histogram<f64>,
}

impl RelayMetrics {
    pub fn new() -> Self {
        Self::from_meter(&opentelemetry::global::meter("carphoto"))
    }

    /// Create the instruments on a specific meter
    pub fn from_meter(meter: &Meter) -> Self {
        Self {
            requests: meter
                .u64_counter(IMAGEGEN_REQUEST_COUNT)
                .with_description("Image generation requests by outcome")
                .build(),
            duration: meter
                .f64_histogram(IMAGEGEN_REQUEST_DURATION)
                .with_description("Image generation request duration")
                .with_unit("s")
                .build(),
        }
    }

    /// Record one finished request
    pub fn record(&self, outcome: &'static str, start: Instant) {
        let attributes = [KeyValue::new(OUTCOME, outcome)];
        self.requests.add(1, &attributes);
        self.duration.record(start.elapsed().as_secs_f64(), &attributes);
    }
}

impl Default for RelayMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RelayMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayMetrics").finish_non_exhaustive()
    }
}
