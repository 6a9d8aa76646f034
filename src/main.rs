//! ZONETRIS terminal front-end
//!
//! Drives a game session on a fixed tick and draws its snapshot with ratatui.

mod input;
mod settings;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::Command;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::Instant,
};
use zonetris::{Session, TickEvent};

/// Get the zonetris temp directory, creating it if needed
fn zonetris_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("zonetris");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = zonetris_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file, the terminal belongs to the UI
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(
        "zonetris=debug"
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
    );
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "ZONETRIS starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    // Load settings, writing the defaults on first run so they can be edited
    let settings = Settings::load();
    let save_result = if Settings::exists() {
        Ok(())
    } else {
        settings.save()
    };

    let mut session = match settings.driver.seed {
        Some(seed) => {
            tracing::info!("Using fixed seed {}", seed);
            Session::with_seed(seed)
        }
        None => Session::new(),
    };

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &mut session, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = save_result {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if result.is_ok() {
        let snapshot = session.snapshot();
        println!("\nThanks for playing ZONETRIS!");
        println!("Final Score: {}", snapshot.score);
        println!("Lines: {} | Efficiency: {}%", snapshot.lines, snapshot.efficiency);
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
    settings: &Settings,
) -> io::Result<()> {
    let tick = settings.driver.tick_interval();
    let mut next_tick = Instant::now() + tick;

    loop {
        let snapshot = session.snapshot();
        terminal.draw(|frame| ui::render_game(frame, &snapshot, settings))?;

        // Wait for input until the next driver tick is due
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match input::command_for(key) {
                        Some(Command::Quit) => {
                            tracing::info!("Quit requested");
                            return Ok(());
                        }
                        Some(Command::Game(action)) => {
                            session.apply(action);
                        }
                        None => {}
                    }
                }
            }
        }

        // Catch up on every tick that elapsed, one gravity check each
        let now = Instant::now();
        while next_tick <= now {
            match session.advance() {
                TickEvent::Locked { lines_cleared, points } if lines_cleared > 0 => {
                    tracing::debug!("Cleared {} lines for {} points", lines_cleared, points);
                }
                TickEvent::ToppedOut => {
                    let snapshot = session.snapshot();
                    tracing::info!(
                        "Game over: score={} lines={} efficiency={}%",
                        snapshot.score,
                        snapshot.lines,
                        snapshot.efficiency
                    );
                }
                _ => {}
            }
            next_tick += tick;
        }
    }
}
