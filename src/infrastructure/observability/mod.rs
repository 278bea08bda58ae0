//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use self::config::MetricsConfig;
pub use metrics::{
    create_metrics_router, init_metrics, record_http_request, record_username_creation,
    record_username_validation, PrometheusMetrics,
};
