mod cli;
mod command;
use crate::cli::{Arguments, Cli, USAGE};
use anyhow::Context;
use gridsnake::config::{Config, ConfigError};
use gridsnake::game::GameEngine;
use gridsnake::observer::LogObserver;
use gridsnake::scheduler::{InputSource, TickScheduler};
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use std::process::ExitCode;
use std::sync::mpsc::channel;
use std::time::Duration;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = match Cli::from_parser(lexopt::Parser::from_env())? {
        Cli::Run(args) => args,
        Cli::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        Cli::Version => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };
    let config = load_config(&args)?;
    let seed = args.seed.or(config.game.seed);
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let period = match args.tick_ms {
        Some(ms) => Duration::from_millis(ms.get()),
        None => config.game.tick_period(),
    };

    let (sender, mut receiver) = channel();
    std::thread::spawn(move || command::forward_commands(std::io::stdin().lock(), &sender));

    let mut engine = GameEngine::new(config.settings(), rng);
    let scheduler = TickScheduler::new(period);
    let mut observer = LogObserver::new();
    let mut best = 0;
    for round in 1..=args.rounds.get() {
        if round > 1 {
            engine.restart();
            receiver.discard_pending();
        }
        let score = scheduler.run(&mut engine, &mut receiver, &mut observer);
        println!("Round {round}: scored {score}");
        if score > best {
            if round > 1 {
                info!("New best score this session: {score}");
            }
            best = score;
        }
    }
    if args.rounds.get() > 1 {
        println!("Best score: {best}");
    }
    Ok(())
}

/// Load the configuration file named on the command line, or else the one at
/// the default location if it exists
fn load_config(args: &Arguments) -> anyhow::Result<Config> {
    let config = if let Some(ref path) = args.config {
        Config::load(path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?
    } else {
        match Config::default_path() {
            Ok(path) => Config::load(&path, true).with_context(|| {
                format!("failed to load configuration from {}", path.display())
            })?,
            Err(e @ ConfigError::NoPath) => {
                warn!("{e}; using built-in defaults");
                Config::default()
            }
            Err(e) => return Err(e.into()),
        }
    };
    info!(
        "Playing on a {}x{} board",
        config.board.width(),
        config.board.height()
    );
    Ok(config)
}
