//! VERITAS Pro: interactive Ratatui fact-checking front-end.
//!
//! Type or paste a claim, optionally attach a screenshot, and submit. The
//! report streams in as a rendered view with verdict badges, confidence bars,
//! and the grounding sources the service cited.

mod app;
mod ui;

use std::{
    fs::OpenOptions,
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use veritas_client::GeminiClient;
use veritas_config::AppConfig;

use crate::app::App;

/// How long to block on terminal input when no timer is due, so worker
/// results are picked up promptly.
const IDLE_POLL: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(
    name = "veritas-tui",
    about = "VERITAS Pro: real-time news fact-checking in the terminal",
    version
)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append logs to this file. Nothing is logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = app.poll_timeout(Instant::now(), IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
        app.pump(Instant::now());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("error: cannot open log file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    }

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    let client = match GeminiClient::new(config.client.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    info!(model = %config.client.model, "starting veritas-tui");

    // Restore the terminal before the panic message is printed.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = App::new(Arc::new(client), &config);
    let outcome = setup_terminal().and_then(|mut terminal| {
        let result = run(&mut terminal, &mut app);
        restore_terminal(&mut terminal)?;
        result
    });

    if let Err(e) = outcome {
        eprintln!("error: terminal failure: {}", e);
        std::process::exit(1);
    }
}
