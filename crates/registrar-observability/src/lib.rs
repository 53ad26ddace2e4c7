//! Registrar Observability Module
//!
//! Provides configurable observability features including:
//! - Structured logging to the console and rolling JSON files
//! - Metrics collection via Prometheus
//! - HTTP request/response logging
//!
//! This module can be enabled or disabled at compile time via the `observability` feature flag.
//! At runtime, observability can be further controlled via the `OBSERVABILITY_ENABLED` environment variable.
//!
//! # Features
//!
//! - `observability` (default): Enables file logging, request logging and metrics
//!
//! # Examples
//!
//! ```no_run
//! use registrar_observability::init_tracing;
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     // ... application code ...
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

// Re-export PrometheusHandle type when observability is enabled
#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

// Public exports when observability is enabled
#[cfg(feature = "observability")]
pub use self::logging::{init_tracing, is_observability_enabled, logging_middleware};
#[cfg(feature = "observability")]
pub use self::metrics::{
    init_metrics, metrics_app, metrics_middleware, track_logout, track_session_started,
    track_store_failure, track_student_created, track_student_deleted, track_student_updated,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// Placeholder for the Prometheus handle when metrics are compiled out
    #[derive(Debug, Clone)]
    pub struct PrometheusHandle;

    /// No-op observability check when feature disabled
    pub fn is_observability_enabled() -> bool {
        false
    }

    /// No-op logging middleware when feature disabled
    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// No-op metrics middleware when feature disabled
    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// Console-only logging when feature disabled
    pub fn init_tracing() {
        super::init_basic_console_logging();
    }

    /// No-op metrics initialization when feature disabled
    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    /// Empty metrics router when feature disabled
    pub fn metrics_app(_handle: PrometheusHandle) -> Router {
        Router::new()
    }

    // No-op tracking functions
    pub fn track_student_created() {}
    pub fn track_student_updated() {}
    pub fn track_student_deleted() {}
    pub fn track_store_failure(_operation: &str) {}
    pub fn track_session_started() {}
    pub fn track_logout() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
