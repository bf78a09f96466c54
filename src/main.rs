use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use grabpod::app::AppContext;
use grabpod::cli::{commands, Cli};
use grabpod::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };
    let config = Config::load_or_create(&config_path)?;

    if cli.list {
        commands::list_podcasts(&config);
        return Ok(());
    }

    let ctx = AppContext::new()?;
    commands::grab(&ctx, &config, &cli.overrides()).await?;

    Ok(())
}
