// CustView - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and CLI overrides
// 3. Logging initialisation (debug mode support)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use custview::app;
pub use custview::core;
pub use custview::platform;
pub use custview::ui;
pub use custview::util;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// CustView - browse a very large customer table.
///
/// Rows are loaded a page at a time as you scroll; the search box scans the
/// whole dataset in the background.
#[derive(Parser, Debug)]
#[command(name = "CustView", version, about)]
struct Cli {
    /// Override the number of records in the dataset.
    #[arg(short = 'n', long = "total-records")]
    total_records: Option<usize>,

    /// Override the number of rows loaded per page.
    #[arg(short = 'p', long = "page-size")]
    page_size: Option<usize>,

    /// Directory containing config.toml (defaults to the platform config dir).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so [logging] level can take effect;
    // its warnings are logged once the subscriber exists.
    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_dir);
    let (mut config, config_warnings) = platform::config::load_config(&config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %config_dir.display(),
        "CustView starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    if let Some(total) = cli.total_records {
        config.engine.total_records = total;
    }
    if let Some(size) = cli.page_size {
        config.engine.page_size = size;
    }
    if let Err(e) = config.engine.validate() {
        tracing::error!(error = %e, "Invalid engine configuration");
        eprintln!("Error: {e}");
        std::process::exit(2);
    }

    let source = Arc::new(crate::core::source::SyntheticSource::new(
        config.engine.total_records,
    ));
    let state = app::state::ViewState::new(config.engine.clone(), source);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 420.0]),
        ..Default::default()
    };

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            ui::theme::apply(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::CustViewApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch CustView GUI: {e}");
        std::process::exit(1);
    }
}
