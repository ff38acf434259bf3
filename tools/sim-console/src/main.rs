//! SIM-Console: terminal operator console for the blockchain simulation.
//!
//! Talks to the simulation backend over its HTTP endpoints only.
//!
//! ## Usage
//!
//! ```bash
//! # Connect to localhost (default)
//! sim-console
//!
//! # Connect to a remote backend, refreshing the dashboard every 5s
//! sim-console --base-url http://sim.example.com:5000 --refresh-secs 5
//! ```

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{error, info};

use sim_console::{
    logging::init_logging, ui, App, Console, ConsoleConfig, RefreshScheduler, SimApi,
    SimApiClient,
};

/// Redraw period; also the resolution of flash message expiry.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Simulation network operator console
#[derive(Parser, Debug)]
#[command(name = "sim-console")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Simulation backend URL [env: SIM_CONSOLE_BASE_URL]
    #[arg(long)]
    base_url: Option<String>,

    /// Dashboard auto-refresh period in seconds [env: SIM_CONSOLE_REFRESH_SECS]
    #[arg(long)]
    refresh_secs: Option<u64>,

    /// Log file path [env: SIM_CONSOLE_LOG_FILE]
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `sim_console=trace` [env: SIM_CONSOLE_LOG_LEVEL]
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    /// Layer command-line values over `base`.
    fn apply(self, mut base: ConsoleConfig) -> ConsoleConfig {
        if let Some(url) = self.base_url {
            base.base_url = url;
        }
        if let Some(secs) = self.refresh_secs {
            base.refresh_interval = Duration::from_secs(secs);
        }
        if let Some(path) = self.log_file {
            base.log_file = path;
        }
        if let Some(level) = self.log_level {
            base.log_level = level;
        }
        base
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Args::parse().apply(ConsoleConfig::from_env());
    config.validate().context("invalid configuration")?;
    init_logging(&config).context("failed to initialize logging")?;

    // Setup terminal with panic hook for cleanup
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "console exited with error");
    }
    result
}

/// Main event loop. Owns the console state; everything else talks to it
/// through channels.
async fn run<B: Backend>(terminal: &mut Terminal<B>, config: ConsoleConfig) -> Result<()> {
    let api: Arc<dyn SimApi> =
        Arc::new(SimApiClient::new(&config).context("failed to build HTTP client")?);

    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel();
    let mut console = Console::new(App::new(&config), api, completion_tx);

    let (tick_tx, mut tick_rx) = mpsc::channel(4);
    let scheduler = RefreshScheduler::start(config.refresh_interval, tick_tx);

    let (key_tx, mut key_rx) = mpsc::channel(64);
    spawn_input_reader(key_tx);

    let mut frame = tokio::time::interval(FRAME_INTERVAL);

    info!(base_url = %config.base_url, "console started");
    console.start();

    loop {
        terminal.draw(|f| ui::render(f, &console.app))?;

        tokio::select! {
            Some(key) = key_rx.recv() => console.on_key(key, Instant::now()),
            Some(completion) = completion_rx.recv() => {
                console.handle_completion(completion, Instant::now());
            }
            Some(_) = tick_rx.recv() => console.on_refresh_tick(),
            _ = frame.tick() => console.app.flash.tick(Instant::now()),
        }

        if console.app.should_quit {
            break;
        }
    }

    scheduler.stop();
    info!("console stopped");
    Ok(())
}

/// Forward key presses from crossterm's blocking reader.
///
/// Exits once the receiver is dropped.
fn spawn_input_reader(tx: mpsc::Sender<KeyCode>) {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(FRAME_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    error!(error = %e, "terminal input failed");
                    break;
                }
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.blocking_send(key.code).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "terminal input failed");
                    break;
                }
            }
        }
    });
}
