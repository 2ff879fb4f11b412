use anyhow::Result;
use clap::Parser;
use storefront_cli::{
    cli::{Args, CliApp, Commands},
    utils::Config,
    views::ViewOptions,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let filter = if args.verbose {
        "debug".to_string()
    } else {
        std::env::var("LOG_LEVEL").unwrap_or("info".to_string())
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🦀 Storefront starting...");

    let config = Config::from_env_with(args.data_url.clone()).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let options = if args.no_animation {
        ViewOptions::instant()
    } else {
        config.view_options()
    };

    let mut app = CliApp::new(config, options)?;
    app.run(args.command.unwrap_or(Commands::Browse)).await?;

    tracing::info!("🦀 Storefront stopped");
    Ok(())
}
