use linkedin_connect::config::{self, Config};
use linkedin_connect::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = config::load_env_files();

    let config = config::load_from_env()?;
    init_tracing(&config);

    match env_file {
        Some(path) => tracing::info!("Loaded environment from {}", path.display()),
        None => tracing::info!("No .env or env.local found, using process environment"),
    }

    server::run(config).await
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
