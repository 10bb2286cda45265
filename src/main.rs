use dotenvy::dotenv;
use jaarplan::logging::init_tracing;
use jaarplan::metrics::{init_metrics, metrics_app, set_observability_enabled};
use jaarplan::router::init_router;
use jaarplan::state::init_app_state;
use jaarplan_config::ServerConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = ServerConfig::from_env();
    init_tracing(&config.log_level);
    set_observability_enabled(config.observability_enabled);

    match init_metrics() {
        Ok(Some(handle)) => {
            let addr = format!("0.0.0.0:{}", config.metrics_port);
            match tokio::net::TcpListener::bind(&addr).await {
                Ok(listener) => {
                    info!("Metrics available at http://{addr}/metrics");
                    tokio::spawn(async move {
                        if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                            error!(error = %e, "Metrics server stopped");
                        }
                    });
                }
                Err(e) => error!(error = %e, %addr, "Failed to bind metrics listener"),
            }
        }
        Ok(None) => info!("Observability disabled"),
        Err(e) => error!(error = %e, "Failed to install metrics recorder"),
    }

    let state = match init_app_state(&config).await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialize application state");
            std::process::exit(1);
        }
    };

    state.store.spawn_change_listener();
    state.projection.clone().spawn();

    let app = init_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    info!("🚀 Server running on http://localhost:{}", config.port);
    info!("📚 Swagger UI available at http://localhost:{}/swagger-ui", config.port);
    info!("📖 Scalar UI available at http://localhost:{}/scalar", config.port);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
