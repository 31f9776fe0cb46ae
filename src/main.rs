use anyhow::Result;
use cropwise_api::config::{Config, LogFormat};
use cropwise_api::routes::build_router;
use cropwise_api::scoring::ModelRegistry;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    init_tracing(config.log_format);

    // Trained classifiers are registered here; none ship with the service
    let registry = ModelRegistry::new();

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        app = %config.app_name,
        deployment = %config.deployment,
        %addr,
        "Listening"
    );

    let router = build_router(&config, registry);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}
