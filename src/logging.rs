use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;
    Ok(())
}

pub async fn log_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    info!(">>> {} {}", request.method(), request.uri());

    let response = next.run(request).await;

    info!("<<< {} ({}ms)", response.status().as_u16(), start.elapsed().as_millis());
    response
}
