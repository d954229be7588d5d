//! Scholar Records - desktop console for student enrollment records.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use scholar_records as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::session::StubAuthenticator;
use app::store::StudentStore;
use app::ui::App;

/// Desktop console for student enrollment records.
#[derive(Parser)]
#[command(name = "scholar-records")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Path to the config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON file with seed records (overrides data.seed_file)
    #[arg(long, value_name = "FILE")]
    seed: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from("config.toml"),
        (None, false) => AppConfig::default_path(),
    };

    let mut startup_error = None;
    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => config,
        ConfigLoadResult::Missing => AppConfig::default(),
        ConfigLoadResult::Invalid(e) => {
            startup_error = Some(format!("Config invalid, using defaults: {e}"));
            AppConfig::default()
        }
    };

    // Initialize logging (guard flushes the log file on exit)
    let _log_guard = app::logging::init(&config.logging);

    tracing::info!("Scholar Records starting...");
    if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
    }
    tracing::info!("Config path: {:?}", config_path);
    if let Some(e) = &startup_error {
        tracing::warn!("{}", e);
    }

    let records = match cli.seed.as_ref().or(config.data.seed_file.as_ref()) {
        Some(path) => app::seed::load_records(path)
            .with_context(|| format!("Failed to load seed data from {}", path.display()))?,
        None => app::seed::default_records().context("Built-in seed data is invalid")?,
    };
    let store = StudentStore::from_records(records);
    tracing::info!("Student store ready with {} records", store.len());

    // Create tokio runtime for authenticator calls
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let authenticator = Arc::new(StubAuthenticator::new(config.auth.default_role));

    let title = config.school.name.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            let mut app = App::new(store, config, config_path, rt, authenticator);
            app.error_message = startup_error;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
