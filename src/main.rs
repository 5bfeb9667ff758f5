mod app;
mod input;
mod ui;

use app::App;
use ascii_battles::build_info;
use ascii_battles::core::constants::LOG_FILE;
use ascii_battles::leaderboard::Leaderboard;
use ascii_battles::settings::Settings;
use ascii_battles::tiles::{TileRenderer, Tileset};
use ascii_battles::utils::persistence::save_path;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Input poll timeout. Shorter than either tick cadence.
const POLL_INTERVAL: Duration = Duration::from_millis(30);

struct CliOptions {
    seed: Option<u64>,
    reduced_motion: bool,
}

fn print_help() {
    println!("Epic ASCII Battles - Terminal Arena\n");
    println!("Usage: battles [options]\n");
    println!("Options:");
    println!("  --seed <n>         Seed every run with <n>");
    println!("  --reduced-motion   Shorten hit effects for this session");
    println!("  --version          Show version information");
    println!("  --help             Show this help message");
}

/// Parses the command line, exiting on `--help`, `--version`, or misuse.
fn parse_args() -> CliOptions {
    let mut options = CliOptions {
        seed: None,
        reduced_motion: false,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--seed" => match args.next().map(|v| v.parse::<u64>()) {
                Some(Ok(seed)) => options.seed = Some(seed),
                _ => {
                    eprintln!("--seed expects a non-negative integer");
                    std::process::exit(1);
                }
            },
            "--reduced-motion" => options.reduced_motion = true,
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'battles --help' for usage.");
                std::process::exit(1);
            }
        }
    }
    options
}

/// Logs go to a file: the terminal belongs to the UI.
fn init_tracing() {
    let Ok(path) = save_path(LOG_FILE) else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
}

/// Hands the terminal back before a panic message is printed.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal();
        tracing::error!(%info, "panic");
        eprintln!("{}", info);
    }));
}

fn main() -> io::Result<()> {
    let options = parse_args();
    install_panic_hook();
    init_tracing();

    let mut settings = Settings::load();
    if options.reduced_motion {
        settings.reduced_motion = true;
    }
    let tileset = Tileset::load();
    tracing::info!(
        seed = ?options.seed,
        tileset = tileset.is_some(),
        gore = ?settings.gore_intensity,
        "starting"
    );
    let mut app = App::new(
        settings,
        Leaderboard::load(),
        TileRenderer::new(tileset),
        options.seed,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::draw_ui(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        app.update(Instant::now());
    }
    tracing::info!("shutting down");
    Ok(())
}
