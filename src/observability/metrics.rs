//! OTLP metrics for storage operations.
//!
//! Key metrics:
//! - picnic_storage_operations_total: Counter of repository calls
//! - picnic_storage_errors_total: Counter of failed repository calls
//! - picnic_storage_latency_seconds: Histogram of repository call latency
//!
//! All carry `entity` and `operation` attributes.

use opentelemetry::metrics::{Counter, Histogram, Meter};
use opentelemetry::{global, KeyValue};
use opentelemetry_sdk::metrics::{ManualReader, SdkMeterProvider};
use std::sync::OnceLock;

/// Global metrics instance.
static METRICS: OnceLock<Metrics> = OnceLock::new();

#[derive(Debug)]
pub struct Metrics {
    pub storage_operations_total: Counter<u64>,
    pub storage_errors_total: Counter<u64>,
    pub storage_latency: Histogram<f64>,
}

impl Metrics {
    fn new(meter: &Meter) -> Self {
        Self {
            storage_operations_total: meter
                .u64_counter("picnic_storage_operations_total")
                .with_description("Total number of storage operations")
                .with_unit("1")
                .init(),
            storage_errors_total: meter
                .u64_counter("picnic_storage_errors_total")
                .with_description("Storage operations that returned an error")
                .with_unit("1")
                .init(),
            storage_latency: meter
                .f64_histogram("picnic_storage_latency_seconds")
                .with_description("Time spent in a storage operation, including pool wait")
                .with_unit("s")
                .init(),
        }
    }
}

/// Initialize the metrics system.
///
/// Subsequent calls are ignored. Without an endpoint, metrics are recorded
/// against a manual reader and never exported.
pub fn init_metrics_with_endpoint(otel_endpoint: Option<&str>) {
    METRICS.get_or_init(|| {
        if let Some(endpoint) = otel_endpoint {
            use opentelemetry_otlp::{Protocol, WithExportConfig};

            let exporter = opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint)
                .with_protocol(Protocol::Grpc);

            match opentelemetry_otlp::new_pipeline()
                .metrics(opentelemetry_sdk::runtime::Tokio)
                .with_exporter(exporter)
                .with_period(std::time::Duration::from_secs(10))
                .build()
            {
                Ok(provider) => {
                    global::set_meter_provider(provider);
                    tracing::info!(endpoint, "OTLP metrics exporter configured");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to create OTLP exporter, using no-op metrics");
                    install_manual_reader();
                }
            }
        } else {
            install_manual_reader();
        }

        let meter = global::meter("picnic");
        Metrics::new(&meter)
    });
}

fn install_manual_reader() {
    let reader = ManualReader::builder().build();
    let provider = SdkMeterProvider::builder().with_reader(reader).build();
    global::set_meter_provider(provider);
}

/// Initialize the metrics system without OTLP export.
pub fn init_metrics() {
    init_metrics_with_endpoint(None);
}

/// Record one storage operation. No-op before initialization.
pub fn record_storage_operation(
    entity: &'static str,
    operation: &'static str,
    latency_seconds: f64,
    ok: bool,
) {
    if let Some(m) = METRICS.get() {
        let attrs = [
            KeyValue::new("entity", entity),
            KeyValue::new("operation", operation),
        ];
        m.storage_operations_total.add(1, &attrs);
        m.storage_latency.record(latency_seconds, &attrs);
        if !ok {
            m.storage_errors_total.add(1, &attrs);
        }
    }
}
