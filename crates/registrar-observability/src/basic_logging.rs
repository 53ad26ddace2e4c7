use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize basic console logging when observability is disabled.
///
/// Used by the CLI and by the server when the `observability` feature is
/// compiled out or `OBSERVABILITY_ENABLED=false`.
///
/// # Configuration
///
/// - **Log Level**: Controlled by `LOG_LEVEL` environment variable (default: "info")
/// - **Filtering**: `RUST_LOG` overrides everything; noisy dependencies stay at warn
/// - **Format**: Compact format with ANSI colors
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "registrar={log_level},registrar_client={log_level},registrar_auth={log_level},tower_http=warn,hyper=warn,reqwest=warn"
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_filter(env_filter);

    // try_init: a second initialization (tests, CLI re-entry) is not an error
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
