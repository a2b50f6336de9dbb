use anyhow::Context;
use clap::Parser;
use std::io;
use stock_tracker::utils::error::ErrorSeverity;
use stock_tracker::utils::{logger, validation::Validate};
use stock_tracker::{
    CliConfig, ConfigProvider, LocalFileStorage, Palette, SessionOutcome, StockApp, Store,
    TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting stock-tracker");
    tracing::debug!("CLI config: {:?}", cli);

    let result = match &cli.config {
        Some(path) => {
            let mut config = TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?;
            cli.apply_overrides(&mut config);
            run_session(&config)
        }
        None => run_session(&cli),
    };

    match result {
        Ok(SessionOutcome::Declined) => {
            tracing::info!("Session declined, no records loaded");
        }
        Ok(SessionOutcome::Completed { operations }) => {
            tracing::info!("Session finished after {} operations", operations);
        }
        Err(e) => {
            tracing::error!(
                "Stock app failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn run_session<C: ConfigProvider + Validate>(config: &C) -> stock_tracker::Result<SessionOutcome> {
    config.validate()?;

    tracing::info!("Using backing file: {}", config.backing_file_path());

    let storage = LocalFileStorage::new(config.backing_file_path());
    let store = Store::new(storage).with_policy(config.malformed_line_policy());

    let stdin = io::stdin();
    let mut app = StockApp::new(store, stdin.lock(), io::stdout())
        .with_palette(Palette::new(config.color_enabled()));

    app.run()
}
