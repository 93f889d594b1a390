use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use highcard_rs::tui::{app::AppConfig, app::AppState, controller};
use ratatui::prelude::*;
use std::fs::File;
use std::io::{self, IsTerminal, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "highcard-rs", version)]
#[command(about = "High-card duel against a robot, in the terminal")]
struct Args {
    /// Base seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Play N games headless and print a summary instead of starting the TUI
    #[arg(long, value_name = "N")]
    simulate: Option<u32>,

    /// Log filter (e.g. "info", "highcard_rs=debug"); falls back to RUST_LOG, then "warn"
    #[arg(long)]
    log_level: Option<String>,

    /// Write logs to this file while the TUI is running
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Controller tick rate in milliseconds
    #[arg(long, default_value = "100")]
    tick_ms: u64,

    /// Extra delay between auto draws, in milliseconds
    #[arg(long, default_value = "0")]
    auto_delay_ms: u64,
}

fn env_filter(args: &Args) -> EnvFilter {
    match &args.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(games) = args.simulate {
        tracing_subscriber::fmt().with_env_filter(env_filter(&args)).with_writer(io::stderr).init();
        let seed = args.seed.unwrap_or_else(rand::random);
        info!(games, seed, "running simulation");
        let report = highcard_rs::sim::simulate(games, seed)?;
        println!("seed:             {seed}");
        println!("{report}");
        return Ok(());
    }

    // The terminal is in raw mode while the TUI runs, so logs only go to a file.
    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter(&args))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    if !io::stdout().is_terminal() {
        println!(
            "highcard-rs TUI requires a real terminal (TTY).\nUse --simulate N for headless play. Version: {}",
            highcard_rs::VERSION
        );
        return Ok(());
    }
    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(args.tick_ms.max(10));
    let mut app = AppState::with_config(AppConfig::new(args.seed, args.auto_delay_ms));
    info!(seed = ?args.seed, "starting TUI");

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res?;
    Ok(())
}
