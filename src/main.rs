//! weatherview - current weather in the terminal
//!
//! A terminal UI application that shows current conditions for a city or
//! the configured current location, fetched from a weather backend.

use std::io;
use std::panic;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use weatherview::app::App;
use weatherview::cli::{Cli, StartupConfig};
use weatherview::clock::{ClockHandle, TICK_INTERVAL};
use weatherview::data::{FetchError, WeatherClient};
use weatherview::dispatch::Dispatcher;
use weatherview::location::{FixedLocation, LocationProvider, NoLocation};
use weatherview::{logging, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Queries the backend health endpoint and reports the result
async fn run_health_check(client: &WeatherClient) -> ExitCode {
    match client.health().await {
        Ok(health) if health.is_up() => {
            println!(
                "{}: {}",
                health.service.as_deref().unwrap_or("weather backend"),
                health.status
            );
            ExitCode::SUCCESS
        }
        Ok(health) => {
            eprintln!("Backend at {} reports status {}", client.base_url(), health.status);
            ExitCode::FAILURE
        }
        Err(FetchError::Network(detail)) => {
            eprintln!("Backend at {} is unreachable: {}", client.base_url(), detail);
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Backend at {} health check failed: {}", client.base_url(), err);
            ExitCode::FAILURE
        }
    }
}

/// Runs the interactive UI until the user quits
async fn run_ui(
    config: StartupConfig,
    client: WeatherClient,
    location: Arc<dyn LocationProvider>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (dispatcher, mut outcomes) = Dispatcher::new(client, location);
    let mut app = App::new(dispatcher.location_supported());
    if let Some(city) = config.initial_city {
        app = app.with_initial_city(city);
    }
    if let Some(effect) = app.initial_effect() {
        dispatcher.dispatch(effect);
    }

    let mut clock = ClockHandle::spawn(TICK_INTERVAL);

    // Main event loop
    loop {
        while let Ok(outcome) = outcomes.try_recv() {
            app.apply_outcome(outcome);
        }
        if let Some(now) = clock.latest() {
            app.on_tick(now);
        }

        // Render UI
        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(effect) = app.handle_key(key) {
                        dispatcher.dispatch(effect);
                    }
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    clock.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    info!("weatherview stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return Ok(ExitCode::from(2));
        }
    };

    match logging::init(config.log_file.as_deref(), &config.log_level) {
        Ok(Some(path)) => info!(path = %path.display(), "logging to file"),
        Ok(None) => {}
        Err(err) => eprintln!("warning: {}", err),
    }

    let client = WeatherClient::new(config.base_url.clone());
    info!(base_url = %config.base_url, "weatherview starting");

    if config.check_only {
        return Ok(run_health_check(&client).await);
    }

    let location: Arc<dyn LocationProvider> = match config.location {
        Some(coords) => Arc::new(FixedLocation::new(coords)),
        None => {
            warn!("no --location given, current location is unavailable");
            Arc::new(NoLocation)
        }
    };

    run_ui(config, client, location).await?;
    Ok(ExitCode::SUCCESS)
}
