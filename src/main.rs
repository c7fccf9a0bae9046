use anyhow::Result;
use clap::Parser;
use paradise_nursery::{
    cli::{Args, CliApp},
    utils::Config,
};

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?;

    let level = if args.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "paradise_nursery={}",
            level
        )))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let mut app = CliApp::new(config, args.catalog).map_err(|e| {
        tracing::error!("Failed to start storefront: {}", e);
        e
    })?;
    app.run(args.command)?;

    Ok(())
}
