//! Sir Interruptsalot debate arena TUI.
//!
//! A terminal front-end for arguing with the remote debate bot: a landing
//! screen collects your opening statement, the arena exchanges arguments
//! under a five-minute clock, and a personality report lands at the end.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for
//! scripted runs and automated testing:
//!
//! ```bash
//! cargo run -p arena -- --headless --statement "cereal is a soup"
//! ```

mod app;
mod events;
mod headless;
mod landing;
mod ui;
mod worker;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use app::App;
use argubot::Argubot;
use events::{handle_event, EventResult};
use landing::Landing;
use ui::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let headless_mode = args.iter().any(|a| a == "--headless");
    init_logging(headless_mode);

    let url = flag_value(&args, "--url");

    if headless_mode {
        let options = headless::HeadlessOptions {
            url,
            statement: flag_value(&args, "--statement"),
        };
        return headless::run_headless(options).await.map_err(|e| e.into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Landing screen: collect the opening statement
    let statement = match run_landing(&mut terminal) {
        Ok(Some(statement)) => statement,
        Ok(None) => {
            // User chickened out
            restore_terminal(&mut terminal)?;
            return Ok(());
        }
        Err(e) => {
            restore_terminal(&mut terminal)?;
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Wire up the API worker and open the session
    let client = match url {
        Some(url) => Argubot::new(url),
        None => Argubot::from_env(),
    };
    let (request_tx, response_rx) = worker::spawn_worker(client);
    let mut app = App::new(request_tx, response_rx);
    app.dispatch_input(statement);

    let result = run_app(&mut terminal, app).await;

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Run the landing screen until a statement is submitted or cancelled.
fn run_landing<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
) -> io::Result<Option<String>> {
    let mut landing = Landing::new();

    loop {
        terminal.draw(|f| {
            let area = f.area();
            landing.render(f, area);
        })?;

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            landing.handle_event(ev);
        }

        if landing.cancelled {
            return Ok(None);
        }

        if landing.finished {
            return Ok(Some(landing.statement().to_string()));
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // Render
        terminal.draw(|f| render(f, &app))?;

        // Drain worker responses
        loop {
            let response = match app.response_rx.try_recv() {
                Ok(response) => response,
                Err(_) => break,
            };
            app.handle_response(response);
        }

        // Poll for events with a timeout so the clock keeps ticking
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;

            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::Submit => {
                    if let Some(input) = app.take_input() {
                        app.dispatch_input(input);
                    }
                }
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        }

        // One-second countdown tick
        if last_tick.elapsed() >= Duration::from_secs(1) {
            app.second_tick();
            last_tick += Duration::from_secs(1);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn restore_terminal<B: ratatui::backend::Backend + io::Write>(
    terminal: &mut Terminal<B>,
) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    Ok(())
}

/// Value of a `--flag value` pair, if present.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Set up tracing when `ARENA_LOG` is set. The TUI owns the terminal, so
/// interactive runs log to a file; headless runs log to stderr.
fn init_logging(headless: bool) {
    if std::env::var("ARENA_LOG").is_err() {
        return;
    }
    let filter = EnvFilter::try_from_env("ARENA_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        let appender = tracing_appender::rolling::never(".", "arena.log");
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(appender)
            .with_ansi(false)
            .init();
    }
}

fn print_help() {
    println!("Sir Interruptsalot - argue with the Undefeated Debate Champion");
    println!();
    println!("USAGE:");
    println!("  arena [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help            Show this help message");
    println!("  --headless            Run in headless mode (line-oriented, no TUI)");
    println!("  --url <URL>           Debate API base URL (default: $ARGUBOT_API_URL)");
    println!();
    println!("HEADLESS OPTIONS (only with --headless):");
    println!("  --statement <TEXT>    Opening statement (otherwise read from stdin)");
    println!();
    println!("ENVIRONMENT:");
    println!("  ARGUBOT_API_URL       Debate API base URL (default: http://127.0.0.1:8000)");
    println!("  ARENA_LOG             Enable tracing, e.g. ARENA_LOG=debug");
    println!();
    println!("EXAMPLES:");
    println!("  arena                                  # Interactive TUI mode");
    println!("  arena --headless                       # Headless with stdin statement");
    println!("  arena --headless --statement \"cereal is a soup\"");
}
