use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use mined_out_core::*;
use tracing_subscriber::filter::LevelFilter;

mod render;

/// Frame length fed to the session while driving it headless.
const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames per autoplay run, so a stuck bot cannot spin forever.
const MAX_FRAMES: u64 = 1_000_000;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// JSON file overriding the default game configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a solvable level and print it with its shortest path
    Preview {
        #[arg(short, long, default_value_t = 1)]
        level: Level,
    },
    /// Let a bot play through the game loop
    Autoplay {
        /// Stop after clearing this many levels
        #[arg(short, long, default_value_t = 5)]
        levels: Level,

        #[arg(long, value_enum, default_value_t = Strategy::Shortest)]
        strategy: Strategy,
    },
    /// Print the effective configuration as JSON
    Config,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Follow the shortest mine-free path to the exit
    Shortest,
    /// Head straight for the exit without looking
    Reckless,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(log_level) = args.verbose.log_level() {
        init_logging(log_level);
    }

    let config = load_config(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    match args.command {
        Command::Preview { level } => preview(config, seed, level),
        Command::Autoplay { levels, strategy } => autoplay(config, seed, levels, strategy),
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn init_logging(level: log::Level) {
    let filter = match level {
        log::Level::Error => LevelFilter::ERROR,
        log::Level::Warn => LevelFilter::WARN,
        log::Level::Info => LevelFilter::INFO,
        log::Level::Debug => LevelFilter::DEBUG,
        log::Level::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    config.validate().map_err(abort)?;
    Ok(config)
}

/// Tags a core error with what went wrong: a bad setting or an unplayable level.
fn abort(err: GameError) -> anyhow::Error {
    let reason = if err.is_config_error() {
        "invalid game configuration"
    } else {
        "could not build a playable level"
    };
    anyhow::Error::new(err).context(reason)
}

fn preview(config: GameConfig, seed: u64, level: Level) -> anyhow::Result<()> {
    if level == 0 {
        bail!("levels start at 1");
    }

    let mut generator = RandomMinefieldGenerator::from_seed(config, seed).map_err(abort)?;
    let minefield = generator
        .generate_solvable(level)
        .map_err(abort)
        .with_context(|| format!("generating level {level}"))?;
    let path = find_path(minefield.entry(), minefield.exit(), &minefield).unwrap_or_default();

    println!(
        "level {} ({:?}), seed {}, {} mines, shortest path {} moves",
        level,
        LevelTheme::for_level(level),
        seed,
        minefield.mine_count(),
        path.len().saturating_sub(1)
    );
    print!("{}", render::board(&minefield, &path));
    Ok(())
}

fn autoplay(config: GameConfig, seed: u64, levels: Level, strategy: Strategy) -> anyhow::Result<()> {
    let generator = RandomMinefieldGenerator::from_seed(config, seed).map_err(abort)?;
    let mut session = Session::new(generator)
        .map_err(abort)
        .context("starting level 1")?;

    for _ in 0..MAX_FRAMES {
        let level = session.state().level();
        if level > levels {
            break;
        }

        let input = match session.mode() {
            Mode::Playing => match next_move(session.state(), strategy) {
                Some(direction) => TickInput {
                    dt: FRAME,
                    ..TickInput::moving(direction)
                },
                None => bail!("bot is stuck on level {level}"),
            },
            Mode::Replay | Mode::Waiting => TickInput {
                dt: FRAME,
                ..TickInput::key()
            },
            Mode::GameOver => break,
        };

        let moves = session.state().move_count();
        let cues = session
            .tick(input)
            .map_err(abort)
            .with_context(|| format!("advancing level {level}"))?;

        if cues.contains(Cues::GAME_OVER) {
            println!("level {:>3}: hit a mine after {} moves, no lives left", level, moves);
        } else if cues.contains(Cues::LIFE_LOST) {
            println!(
                "level {:>3}: hit a mine after {} moves, {} lives left",
                level,
                moves,
                session.state().lives()
            );
        }
        if session.state().level() > level {
            println!(
                "level {:>3}: cleared in {} moves, score {}",
                level,
                moves,
                session.state().score()
            );
        }
    }

    match session.final_score() {
        Some(score) => println!("game over on level {}, final score {}", session.state().level(), score),
        None => println!(
            "stopped on level {}, score {}, lives {}",
            session.state().level(),
            session.state().score(),
            session.state().lives()
        ),
    }
    Ok(())
}

fn next_move(state: &GameState, strategy: Strategy) -> Option<Direction> {
    let minefield = state.minefield();
    let here = state.player_pos();
    let exit = minefield.exit();

    match strategy {
        Strategy::Shortest => {
            let path = find_path(here, exit, minefield)?;
            Direction::between(path[0], *path.get(1)?)
        }
        Strategy::Reckless => Some(if here.x < exit.x {
            Direction::Right
        } else if here.x > exit.x {
            Direction::Left
        } else {
            Direction::Up
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_bot_heads_for_exit() {
        let config = GameConfig::default();
        let minefield = Minefield::from_mine_coords(&config, &[]).unwrap();
        let state = GameState::at_level_start(1, std::sync::Arc::new(minefield), 0, 3);

        assert_eq!(next_move(&state, Strategy::Shortest), Some(Direction::Up));
        assert_eq!(next_move(&state, Strategy::Reckless), Some(Direction::Up));
    }

    #[test]
    fn abort_names_the_cause() {
        let config = abort(GameError::TooManyMines {
            requested: 700,
            available: 500,
        });
        let generation = abort(GameError::LevelGenerationFailed {
            level: 4,
            attempts: 100,
        });

        assert_eq!(config.to_string(), "invalid game configuration");
        assert_eq!(generation.to_string(), "could not build a playable level");
        assert!(generation.root_cause().to_string().contains("level 4"));
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from(["mined-out", "-v", "--seed", "7", "autoplay", "--levels", "2"])
            .unwrap();

        assert_eq!(args.seed, Some(7));
        assert!(matches!(
            args.command,
            Command::Autoplay {
                levels: 2,
                strategy: Strategy::Shortest
            }
        ));
    }
}
