use dotenvy::dotenv;
use registrar::router::init_router;
use registrar::state::init_app_state;
use registrar_observability::{init_metrics, init_tracing, metrics_app};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let state = init_app_state();
    let addr = match state.server_config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Invalid server address");
            std::process::exit(1);
        }
    };

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
        info!("Prometheus metrics available at /metrics");
    }

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    println!("🚀 Server running on http://{addr}");
    println!("📚 Swagger UI available at http://{addr}/swagger-ui");
    println!("📖 Scalar UI available at http://{addr}/scalar");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
