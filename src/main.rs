// forktty: step-by-step fork() simulator

use std::fs::File;
use std::io;
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use forktty::config::{self, Config};
use forktty::driver::Driver;
use forktty::errors::SimError;
use forktty::ui::App;

/// Send tracing output to `path`. The TUI owns stdout/stderr, so without a log
/// file nothing is recorded.
fn init_tracing(path: &std::path::Path) -> Result<(), SimError> {
    let file = File::create(path)?;
    let env_filter = EnvFilter::try_from_env(config::LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "forktty".to_string());

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", config::usage(&program_name));
            std::process::exit(1);
        }
    };

    let source = match config.load_source() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = &config.log_file {
        init_tracing(path)?;
    }
    info!(
        file = %config.source_path.display(),
        lines = source.lines().count(),
        "loaded program"
    );

    let driver = Driver::new(source, config.tick_interval, config.snapshot_limit);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(driver);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
