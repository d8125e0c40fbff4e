//! Speaker service entry point

use clap::Parser;
use speaker::cli::{serve::ServeArgs, Cli, Commands};
use speaker::common::error::SpeakerResult;
use speaker::config::SpeakerConfig;
use speaker::db::{self, seed::import_speakers_from_json};
use speaker::{logging, server, AppState};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let args = match cli.command {
        Some(Commands::Serve(args)) => args,
        None => ServeArgs::from_env(),
    };

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_server(args).await {
        tracing::error!("Server failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run_server(args: ServeArgs) -> SpeakerResult<()> {
    let mut config = SpeakerConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    info!(
        "Starting speaker service v{} (database: {})",
        env!("CARGO_PKG_VERSION"),
        config.database_url
    );

    let pool = db::initialize_database(&config.database_url).await?;

    if let Some(seed_file) = &config.seed_file {
        import_speakers_from_json(&pool, Path::new(seed_file)).await?;
    }

    let bind_addr = config.bind_addr();
    let state = AppState::new(Arc::new(pool), config)?;
    server::run(state, &bind_addr).await
}
