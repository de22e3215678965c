use std::fs::File;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use grid_snake::audio::{dispatch_cues, SilentAudio};
use grid_snake::config::{
    GameConfig, GridSize, Upgrades, DEFAULT_GRID_SIZE, DEFAULT_TICK_INTERVAL_MS,
    MIN_TICK_INTERVAL_MS, START_DELAY,
};
use grid_snake::game::{GameEvent, GameState};
use grid_snake::input::{poll_input, GameInput};
use grid_snake::prefs::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore, Profile};
use grid_snake::renderer::{self, DeathAnimation, Overlay};
use grid_snake::ui::hud::HudInfo;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    width: u16,
    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    height: u16,
    /// Milliseconds between two simulation ticks.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,
    /// Seed for fruit placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
    /// Keep high score and attempts in memory only.
    #[arg(long = "no-save")]
    no_save: bool,
    /// Enable the second fruit for this run.
    #[arg(long = "double-fruit")]
    double_fruit: bool,
    /// Enable the longer countdown for this run.
    #[arg(long = "extended-timer")]
    extended_timer: bool,
    /// Enable wrap-around walls for this run.
    #[arg(long = "wrap-walls")]
    wrap_walls: bool,
}

type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Where the front end is in the round lifecycle.
enum Phase {
    Start,
    Playing { next_tick: Instant },
    Paused,
    Over {
        death: DeathAnimation,
        previous_high_score: u32,
    },
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut profile = Profile::new(open_store(cli.no_save));
    let config = session_config(&cli, profile.upgrades())?;
    log::info!("starting with {config:?}");

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &cli, config, &mut profile);
    cleanup_terminal()?;
    result
}

fn run(
    terminal: &mut AppTerminal,
    cli: &Cli,
    config: GameConfig,
    profile: &mut Profile<Box<dyn PreferenceStore>>,
) -> io::Result<()> {
    let tick_interval = Duration::from_millis(cli.tick_ms.max(MIN_TICK_INTERVAL_MS));
    let mut audio = SilentAudio::default();
    let mut state = new_game(config, cli.seed)?;
    let mut phase = Phase::Start;
    let mut attempt = profile.attempts();
    // Refreshed only when the board changes, so a latched turn shows on the next move.
    let mut snapshot = state.snapshot();

    loop {
        let now = Instant::now();
        let hud_info = HudInfo {
            high_score: profile.high_score(),
            attempt,
            timer_full: config.timer_reset_value(),
        };
        let (overlay, death) = match &phase {
            Phase::Start => (Overlay::Start, None),
            Phase::Paused => (Overlay::Paused, None),
            Phase::Playing { .. } => (Overlay::None, None),
            Phase::Over {
                death,
                previous_high_score,
            } => (
                snapshot
                    .status
                    .end_reason()
                    .map_or(Overlay::None, |reason| Overlay::GameOver {
                        reason,
                        previous_high_score: *previous_high_score,
                    }),
                Some((death, now)),
            ),
        };
        terminal.draw(|frame| renderer::render(frame, &snapshot, &hud_info, overlay, death))?;

        if let Some(input) = poll_input(FRAME_INTERVAL)? {
            match input {
                GameInput::Quit => break,
                GameInput::Confirm if matches!(phase, Phase::Start | Phase::Over { .. }) => {
                    if state.is_over() {
                        state = new_game(config, cli.seed)?;
                        snapshot = state.snapshot();
                    }
                    attempt = profile.begin_attempt().unwrap_or_else(|error| {
                        log::warn!("could not store attempt counter: {error}");
                        attempt + 1
                    });
                    phase = Phase::Playing {
                        next_tick: Instant::now() + START_DELAY,
                    };
                }
                GameInput::Pause => {
                    phase = match phase {
                        Phase::Playing { .. } => Phase::Paused,
                        Phase::Paused => Phase::Playing {
                            next_tick: Instant::now() + tick_interval,
                        },
                        other => other,
                    };
                }
                GameInput::Direction(direction) if matches!(phase, Phase::Playing { .. }) => {
                    let events: Vec<GameEvent> = state.request_turn(direction).into_iter().collect();
                    dispatch_cues(&events, &mut audio);
                }
                _ => {}
            }
        }

        if let Phase::Playing { next_tick } = &mut phase
            && Instant::now() >= *next_tick
        {
            *next_tick += tick_interval;
            let events = state.tick();
            snapshot = state.snapshot();
            dispatch_cues(&events, &mut audio);

            if let Some(GameEvent::GameOver { death_sequence, .. }) = events
                .into_iter()
                .find(|event| matches!(event, GameEvent::GameOver { .. }))
            {
                let previous_high_score = profile.high_score();
                if let Err(error) = profile.record_game_over(state.score) {
                    log::warn!("could not save high score: {error}");
                }
                phase = Phase::Over {
                    death: DeathAnimation::new(death_sequence, Instant::now()),
                    previous_high_score,
                };
            }
        }
    }

    Ok(())
}

fn new_game(config: GameConfig, seed: Option<u64>) -> io::Result<GameState> {
    let state = match seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    };
    state.map_err(io::Error::other)
}

fn session_config(cli: &Cli, stored: Upgrades) -> io::Result<GameConfig> {
    let grid = GridSize {
        width: cli.width,
        height: cli.height,
    };
    let upgrades = Upgrades {
        double_fruit: stored.double_fruit || cli.double_fruit,
        extended_timer: stored.extended_timer || cli.extended_timer,
        wrap_walls: stored.wrap_walls || cli.wrap_walls,
    };
    GameConfig::new(grid, upgrades)
        .validate()
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))
}

fn open_store(no_save: bool) -> Box<dyn PreferenceStore> {
    if no_save {
        return Box::new(MemoryPreferenceStore::default());
    }

    match JsonPreferenceStore::open_default() {
        Ok(store) => {
            log::debug!("preferences at {}", store.path().display());
            Box::new(store)
        }
        Err(error) => {
            log::warn!("ignoring unreadable preferences: {error}");
            Box::new(MemoryPreferenceStore::default())
        }
    }
}

fn init_logging(path: Option<&PathBuf>) -> io::Result<()> {
    // Logging to the terminal would tear the alternate screen, so without a
    // file the logger stays uninstalled.
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn setup_terminal() -> io::Result<AppTerminal> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn cleanup_terminal() -> io::Result<()> {
    disable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)?;

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal();
        default_hook(panic_info);
    }));
}
