use std::fs::File;
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use tstris::config::Config;
use tstris::constants::{FRAME_RATE, GRAVITY_TICK};
use tstris::game::{Game, ShapeFactory};
use tstris::input::{Control, KeyboardTracker};
use tstris::ui::ui;

/// Falling-block puzzle game for the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between gravity steps.
    #[arg(long, default_value_t = GRAVITY_TICK.as_millis() as u64)]
    gravity_ms: u64,

    /// The framerate at which to run the main loop.
    #[arg(short, long, default_value_t = FRAME_RATE)]
    fps: u32,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let default_filter = if config.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::new(args.seed, args.gravity_ms, args.fps, args.log_file, args.verbose)?;
    init_logging(&config)?;

    let factory = match config.seed {
        Some(seed) => ShapeFactory::from_seed(seed),
        None => ShapeFactory::from_entropy(),
    };
    tracing::info!(seed = ?config.seed, gravity_tick = ?config.gravity_tick, "tstris starting");

    // Setup terminal
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Key release events need keyboard enhancement
    let keyboard_enhancement_active = matches!(
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        ),
        Ok(())
    );

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut game = Game::new(factory, config.gravity_tick, Instant::now());
    let mut tracker = KeyboardTracker::new(keyboard_enhancement_active);

    let result = run(&mut terminal, &mut game, &mut tracker, config.frame_time);

    // Cleanup
    if keyboard_enhancement_active {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("tstris exiting");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    game: &mut Game,
    tracker: &mut KeyboardTracker,
    frame_time: Duration,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();
        terminal.draw(|f| ui(f, game))?;

        // Read input until the frame is over
        while let Some(remaining) = frame_time.checked_sub(frame_start.elapsed()) {
            if !event::poll(remaining)? {
                break;
            }
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                match tracker.handle_key(code, kind, Instant::now()) {
                    Some(Control::Quit) => return Ok(()),
                    Some(Control::Restart) => {
                        game.reset(Instant::now());
                        tracker.release_all();
                    }
                    None => {}
                }
            }
        }

        let now = Instant::now();
        game.update(tracker.snapshot(now), now);
    }
}
