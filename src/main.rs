use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use classic_snake::config::{
    DEFAULT_CELL_SIZE, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, GridModel, REDRAW_INTERVAL,
    THEME_CLASSIC,
};
use classic_snake::game::{GameEngine, GameStatus};
use classic_snake::input::{GameInput, InputRouter};
use classic_snake::renderer::{self, BufferSurface};
use classic_snake::scheduler::Scheduler;
use classic_snake::score::{JsonFileStore, ScoreStore};
use classic_snake::terminal_runtime::{AppTerminal, TerminalSession, install_panic_hook};
use classic_snake::ui::hud::{HudInfo, render_hud};
use clap::Parser;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout};

const HUD_HEIGHT: u16 = 2;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Play surface width in terminal columns (two columns per cell).
    #[arg(long, default_value_t = DEFAULT_SURFACE_WIDTH)]
    width: u16,

    /// Play surface height in terminal rows.
    #[arg(long, default_value_t = DEFAULT_SURFACE_HEIGHT)]
    height: u16,

    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// High score file. Defaults to the platform data directory.
    #[arg(long = "scores-file")]
    scores_file: Option<PathBuf>,

    /// Write logs to this file. Level comes from RUST_LOG, default info.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Disable mouse drags as swipe input.
    #[arg(long = "no-mouse")]
    no_mouse: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let grid = GridModel::from_surface(cli.width, cli.height, DEFAULT_CELL_SIZE)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let store = cli
        .scores_file
        .clone()
        .map_or_else(JsonFileStore::at_default_location, JsonFileStore::new);
    log::info!(
        "{}x{} grid, high scores in {}",
        grid.width,
        grid.height,
        store.path().display()
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::new_with_seed(grid, seed, store),
        None => GameEngine::new(grid, store),
    };
    let input = InputRouter::new(!cli.no_mouse);

    install_panic_hook();
    let mut session = TerminalSession::enter(!cli.no_mouse)?;
    run(session.terminal_mut(), engine, input)
}

fn run<S: ScoreStore>(
    terminal: &mut AppTerminal,
    mut engine: GameEngine<S>,
    mut input: InputRouter,
) -> io::Result<()> {
    let mut scheduler = Scheduler::new();

    loop {
        terminal.draw(|frame| draw(frame, &engine))?;

        let timeout = scheduler
            .time_until_due(Instant::now())
            .map_or(REDRAW_INTERVAL, |due| due.min(REDRAW_INTERVAL));

        if let Some(game_input) = input.poll_input(timeout)? {
            if !handle_input(&mut engine, &mut scheduler, game_input) {
                break;
            }
        }

        let now = Instant::now();
        scheduler.sync(is_running(&engine), now, engine.tick_interval());
        if scheduler.fire(now) {
            let outcome = engine.tick();
            log::debug!("tick {} -> {outcome:?}", engine.tick_count());
            scheduler.sync(is_running(&engine), now, engine.tick_interval());
        }
    }

    log::info!("quit with high score {}", engine.high_score());
    Ok(())
}

/// Applies one input; returns false when the player asked to quit.
fn handle_input<S: ScoreStore>(
    engine: &mut GameEngine<S>,
    scheduler: &mut Scheduler,
    input: GameInput,
) -> bool {
    match input {
        GameInput::Direction(direction) => {
            let _ = engine.request_direction(direction);
        }
        GameInput::Toggle => engine.toggle(),
        GameInput::Reset => {
            scheduler.cancel();
            engine.reset();
            engine.start();
        }
        GameInput::Quit => return false,
    }

    true
}

fn is_running<S: ScoreStore>(engine: &GameEngine<S>) -> bool {
    engine.status() == GameStatus::Running
}

fn draw<S: ScoreStore>(frame: &mut Frame<'_>, engine: &GameEngine<S>) {
    let grid = engine.grid();
    let [canvas_row, hud_area] = Layout::vertical([
        Constraint::Length(grid.surface_height()),
        Constraint::Length(HUD_HEIGHT),
    ])
    .flex(Flex::Center)
    .areas(frame.area());
    let [canvas] = Layout::horizontal([Constraint::Length(grid.surface_width())])
        .flex(Flex::Center)
        .areas(canvas_row);

    let buffer = frame.buffer_mut();
    renderer::render(
        &mut BufferSurface::new(buffer, canvas),
        &engine.scene(),
        &THEME_CLASSIC,
    );
    render_hud(
        buffer,
        hud_area,
        &HudInfo {
            score: engine.score(),
            high_score: engine.high_score(),
            length: engine.snake().len(),
            tick_interval: engine.tick_interval(),
            status: engine.status(),
            theme: &THEME_CLASSIC,
        },
    );
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
