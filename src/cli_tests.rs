//! CLI argument parsing tests.

use crate::{Cli, Commands, ConfigAction, LayoutAction};
use clap::{CommandFactory, Parser};
use school_console::layout::WidgetKind;
use std::path::PathBuf;

#[test]
fn verify_cli() {
    Cli::command().debug_assert();
}

#[test]
fn test_tui_without_data_uses_sample() {
    let cli = Cli::try_parse_from(["scd", "tui"]).unwrap();
    match cli.command {
        Commands::Tui { data } => assert!(data.is_none()),
        _ => panic!("expected Tui command"),
    }
}

#[test]
fn test_tui_data_flag() {
    let cli = Cli::try_parse_from(["scd", "tui", "--data", "/tmp/dash.json"]).unwrap();
    match cli.command {
        Commands::Tui { data } => assert_eq!(data, Some(PathBuf::from("/tmp/dash.json"))),
        _ => panic!("expected Tui command"),
    }
}

#[test]
fn test_layout_toggle_parses_widget_id() {
    let cli = Cli::try_parse_from(["scd", "layout", "toggle", "module-status"]).unwrap();
    match cli.command {
        Commands::Layout {
            action: LayoutAction::Toggle { id },
        } => assert_eq!(id, WidgetKind::ModuleStatus),
        _ => panic!("expected layout toggle"),
    }
}

#[test]
fn test_layout_toggle_rejects_unknown_id() {
    let result = Cli::try_parse_from(["scd", "layout", "toggle", "attendance"]);
    assert!(result.is_err());
}

#[test]
fn test_layout_move_positions() {
    let cli = Cli::try_parse_from(["scd", "layout", "move", "3", "0"]).unwrap();
    match cli.command {
        Commands::Layout {
            action: LayoutAction::Move { from, to },
        } => {
            assert_eq!(from, 3);
            assert_eq!(to, 0);
        }
        _ => panic!("expected layout move"),
    }
}

#[test]
fn test_layout_move_rejects_negative() {
    let result = Cli::try_parse_from(["scd", "layout", "move", "-1", "0"]);
    assert!(result.is_err());
}

#[test]
fn test_layout_without_action_fails() {
    let result = Cli::try_parse_from(["scd", "layout"]);
    assert!(result.is_err());
}

#[test]
fn test_config_init_force_flag() {
    let cli = Cli::try_parse_from(["scd", "config", "init", "--force"]).unwrap();
    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { force },
        } => assert!(force),
        _ => panic!("expected Config init"),
    }
}

#[test]
fn test_config_path_and_validate_parse() {
    for action in ["path", "validate"] {
        let result = Cli::try_parse_from(["scd", "config", action]);
        assert!(result.is_ok(), "config {action} should parse");
    }
}

#[test]
fn test_config_without_action_fails() {
    let result = Cli::try_parse_from(["scd", "config"]);
    assert!(result.is_err());
}
