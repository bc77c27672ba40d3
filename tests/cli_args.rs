//! Integration tests for CLI argument handling
//!
//! Tests startup validation and the --check health mode from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_weatherview"))
        .args(args)
        .env_remove("WEATHER_API_URL")
        .output()
        .expect("Failed to execute weatherview")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("weatherview"), "Help should mention weatherview");
    assert!(stdout.contains("--base-url"), "Help should mention --base-url");
    assert!(stdout.contains("--location"), "Help should mention --location");
}

#[test]
fn test_invalid_location_prints_error_and_exits() {
    let output = run_cli(&["--location", "999,0", "--check"]);
    assert!(
        !output.status.success(),
        "Expected invalid location to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid location"),
        "Should print error message about invalid location: {}",
        stderr
    );
}

#[test]
fn test_invalid_base_url_prints_error_and_exits() {
    let output = run_cli(&["--base-url", "not a url", "--check"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid base URL"), "stderr: {}", stderr);
}

#[test]
fn test_check_against_unreachable_backend_fails() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let log_file = temp_dir.path().join("check.log");

    let output = run_cli(&[
        "--base-url",
        "http://127.0.0.1:1",
        "--log-file",
        log_file.to_str().unwrap(),
        "--check",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unreachable"), "stderr: {}", stderr);
    assert!(log_file.exists(), "log file should be created");
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use weatherview::cli::{parse_location_arg, Cli, StartupConfig, DEFAULT_BASE_URL};

    #[test]
    fn test_cli_city_flag() {
        let cli = Cli::parse_from(["weatherview", "--city", "London"]);
        assert_eq!(cli.city.as_deref(), Some("London"));
    }

    #[test]
    fn test_cli_log_options() {
        let cli = Cli::parse_from([
            "weatherview",
            "--log-file",
            "/tmp/wv.log",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_file.as_deref(), Some(std::path::Path::new("/tmp/wv.log")));
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_parse_location_arg_returns_coordinates() {
        let coords = parse_location_arg("49.28,-123.12").unwrap();
        assert_eq!(coords.lat, 49.28);
        assert_eq!(coords.lon, -123.12);
    }

    #[test]
    fn test_startup_config_without_city_starts_empty() {
        let cli = Cli::parse_from(["weatherview", "--base-url", DEFAULT_BASE_URL]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.initial_city.is_none());
        assert!(config.location.is_none());
        assert!(!config.check_only);
    }

    #[test]
    fn test_startup_config_with_base_path() {
        let cli = Cli::parse_from(["weatherview", "--base-url", "https://example.com/weather/"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.base_url.path(), "/weather/");
    }
}
