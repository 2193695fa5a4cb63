//! School Console Dashboard - CLI entry point
//!
//! Launches the terminal dashboard and offers layout and config maintenance
//! commands that work on the same persisted state.

use clap::{Parser, Subcommand};
use school_console::config::error::ConfigError;
use school_console::config::schema::Config;
use school_console::config::{default, loader::ConfigLoader, xdg};
use school_console::data::DashboardData;
use school_console::layout::{reorder, LayoutProvider, WidgetKind};
use school_console::logging;
use school_console::tui::app::{App, TuiSettings};
use std::path::PathBuf;
use std::process::ExitCode;

/// School Console Dashboard
#[derive(Parser)]
#[command(name = "scd")]
#[command(version, about = "School Console Dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the scd CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal dashboard
    Tui {
        /// JSON file with dashboard content (built-in sample data if omitted)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Inspect or edit the persisted widget layout
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `layout` subcommand.
#[derive(Subcommand)]
enum LayoutAction {
    /// Print the current layout as JSON
    Show,
    /// Show or hide a widget
    Toggle {
        /// Widget id (alerts, financial-overview, module-status, realtime-activity)
        id: WidgetKind,
    },
    /// Move the widget at one visual position to another (0-based, enabled widgets only)
    Move { from: usize, to: usize },
    /// Restore the default layout
    Reset,
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { action } => run_config_command(action),
        Commands::Layout { action } => {
            let Some(config) = load_config() else {
                return ExitCode::FAILURE;
            };
            init_logging(&config, false);
            run_layout_command(&config, action)
        }
        Commands::Tui { data } => {
            let Some(config) = load_config() else {
                return ExitCode::FAILURE;
            };
            init_logging(&config, true);
            run_tui(&config, data)
        }
    }
}

/// Loads and validates the config, reporting failures on stderr.
fn load_config() -> Option<Config> {
    let result = ConfigLoader::load_default().and_then(|config| {
        config.validate()?;
        Ok(config)
    });
    match result {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Config error: {e}");
            None
        }
    }
}

fn init_logging(config: &Config, owns_terminal: bool) {
    if let Err(e) = logging::init(&config.log, owns_terminal) {
        eprintln!("Warning: could not open log file: {e}");
    }
}

fn run_config_command(action: ConfigAction) -> ExitCode {
    let result: Result<(), ConfigError> = match action {
        ConfigAction::Init { force } => default::create_default_config(force).map(|path| {
            println!("Created configuration at {}", path.display());
        }),
        ConfigAction::Path => {
            println!("{}", xdg::config_path().display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load_default().and_then(|config| {
            config.validate()?;
            println!("Configuration is valid");
            println!("{config:#?}");
            Ok(())
        }),
    };
    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Runs one layout command against the persisted store, then flushes and
/// tears the provider down.
fn run_layout_command(config: &Config, action: LayoutAction) -> ExitCode {
    let mut provider = match LayoutProvider::from_config(config) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = match action {
        LayoutAction::Show => match serde_json::to_string_pretty(provider.store().layout()) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: failed to serialize layout: {e}");
                ExitCode::FAILURE
            }
        },
        LayoutAction::Toggle { id } => match provider.store_mut().toggle_widget(id) {
            Some(enabled) => {
                let state = if enabled { "shown" } else { "hidden" };
                println!("{id}: {state}");
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("Error: widget '{id}' is not in the layout");
                ExitCode::FAILURE
            }
        },
        LayoutAction::Move { from, to } => {
            match reorder::commit_move(provider.store_mut(), from, to) {
                Ok(_) => {
                    let order: Vec<&str> = provider
                        .store()
                        .enabled_widgets()
                        .iter()
                        .map(|d| d.id.as_str())
                        .collect();
                    println!("{}", order.join(" "));
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        LayoutAction::Reset => {
            provider.store_mut().reset_layout();
            println!("Layout reset to defaults");
            ExitCode::SUCCESS
        }
    };

    provider.store_mut().flush();
    provider.teardown();
    code
}

fn run_tui(config: &Config, data: Option<PathBuf>) -> ExitCode {
    let data = match data {
        Some(path) => match DashboardData::load(&path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => DashboardData::sample(),
    };
    let settings = match TuiSettings::from_config(&config.tui) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut provider = match LayoutProvider::from_config(config) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let result = rt.block_on(async {
        let mut app = App::new(data, settings);
        let result = app.run(&mut provider).await;
        provider.teardown();
        result
    });
    if let Err(e) = result {
        eprintln!("TUI error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod cli_tests;
