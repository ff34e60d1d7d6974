//! Send-push server - FCM test sends and daily reminder broadcasts.

use axum::middleware;
use color_eyre::eyre::WrapErr as _;
use notify_server::Config;
use notify_server::config::StoreConfig;
use notify_storage::{PgTokenStore, RestTokenStore, TokenBackend};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("send-push starting");

    let config = Config::from_env().wrap_err("failed to load configuration")?;

    // The FCM client must exist before the first request is routed.
    let messaging = notify_fcm::initialize(config.service_account.clone(), &config.fcm_api_base)
        .await
        .wrap_err("failed to initialize FCM")?;

    let store: TokenBackend = match &config.store {
        StoreConfig::Supabase {
            url,
            service_role_key,
        } => {
            tracing::info!(url = %url, "reading device tokens from Supabase");
            RestTokenStore::new(url.as_str(), service_role_key.as_str())?.into()
        }
        StoreConfig::Postgres { database_url } => {
            tracing::info!("reading device tokens from Postgres");
            PgTokenStore::new(database_url).wrap_err("failed to initialize storage")?.into()
        }
    };

    let dispatcher = notify_service::Dispatcher::new(store, messaging);

    let app = notify_http::send_push_router(dispatcher)
        .layer(middleware::from_fn(notify_http::logging_middleware))
        .layer(TraceLayer::new_for_http());

    tracing::info!(addr = %config.bind_addr, "listening");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .wrap_err("failed to bind")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server error")?;

    tracing::info!("send-push stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl-c"),
        _ = terminate => tracing::info!("received SIGTERM"),
    }
}
