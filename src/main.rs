use anyhow::Context;
use happythoughts::{db, logging, router, AppState, Config, Thoughts};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_tracing()?;

    let config = Config::from_env()?;
    let thoughts = Thoughts::new(db::connect(&config).await?);

    let app = router(AppState::new(thoughts.clone()));
    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("could not bind port {}", config.port))?;

    info!("Server running on http://localhost:{}", config.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    thoughts.close().await;
    info!("bye");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("could not listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
