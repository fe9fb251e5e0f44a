use std::net::SocketAddr;

use cardoctor_api::{app, AppState, AuthConfig, CookiePolicy};
use cardoctor_store::{app_config::Config, Repositories};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cardoctor_api=debug,cardoctor_store=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        port = config.server.port,
        environment = %config.server.environment,
        "Starting Car Doctor API"
    );

    let repositories = Repositories::connect(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    let app_state = AppState {
        services: repositories.services.clone(),
        bookings: repositories.bookings.clone(),
        auth: AuthConfig {
            secret: config.auth.access_token_secret.clone(),
            expiration: config.auth.token_lifetime_seconds,
        },
        cookie_policy: CookiePolicy::from_production_flag(config.server.is_production()),
        allowed_origins: config.server.allowed_origins.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server is running on port {}", config.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repositories.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
