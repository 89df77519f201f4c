//! medpredict: multiple disease prediction in the terminal.
//!
//! Main entry point for the terminal application.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medpredict::adapters::JsonModelLoader;
use medpredict::application::{ModelRegistry, PredictionService};
use medpredict::config::Config;
use medpredict::tui::App;

fn main() -> Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;

    // Logs on the terminal would corrupt the alternate screen, so an
    // interactive session logs to a file unless told otherwise.
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if config.logging.use_file(interactive) {
        let log_file = &config.logging.file;
        if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {parent:?}"))?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("Failed to open log file {log_file:?}"))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    tracing::info!("Starting medpredict...");

    // Refuse to start unless every disease model loads.
    let loader = JsonModelLoader::new(config.models.require_manifest);
    let registry = ModelRegistry::load(&config.models, &loader)
        .context("Failed to load disease models")?;
    let service = PredictionService::new(Arc::new(registry));

    let mut app = App::new(service);
    app.run()?;

    tracing::info!("medpredict shutdown complete.");
    Ok(())
}
