use lexopt::{Arg, Parser, ValueExt};
use std::num::{NonZeroU32, NonZeroU64};
use std::path::PathBuf;

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Cli {
    Run(Arguments),
    Help,
    Version,
}

/// Options for a normal run.  Anything given here overrides the
/// configuration file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Arguments {
    pub(crate) config: Option<PathBuf>,
    pub(crate) seed: Option<u64>,
    pub(crate) tick_ms: Option<NonZeroU64>,
    pub(crate) rounds: NonZeroU32,
}

impl Default for Arguments {
    fn default() -> Arguments {
        Arguments {
            config: None,
            seed: None,
            tick_ms: None,
            rounds: NonZeroU32::MIN,
        }
    }
}

impl Cli {
    pub(crate) fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Long("tick-ms") => args.tick_ms = Some(parser.value()?.parse()?),
                Arg::Long("rounds") => args.rounds = parser.value()?.parse()?,
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }
}

pub(crate) static USAGE: &str = "\
Usage: gridsnake [options]

Play snake on a grid.  Steer by typing one command per line on standard input:
  w, k, up      a, h, left      s, j, down      d, l, right

Options:
  -c, --config <PATH>   Read configuration from PATH
      --seed <N>        Seed the food placement
      --tick-ms <N>     Milliseconds between moves
      --rounds <N>      Number of runs to play [default: 1]
  -h, --help            Show this help and exit
  -V, --version         Show the program version and exit
";

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, lexopt::Error> {
        Cli::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]).unwrap(), Cli::Run(Arguments::default()));
    }

    #[test]
    fn all_args() {
        assert_eq!(
            parse(&[
                "--config",
                "snake.toml",
                "--seed",
                "42",
                "--tick-ms=50",
                "--rounds",
                "3"
            ])
            .unwrap(),
            Cli::Run(Arguments {
                config: Some(PathBuf::from("snake.toml")),
                seed: Some(42),
                tick_ms: NonZeroU64::new(50),
                rounds: NonZeroU32::new(3).unwrap(),
            })
        );
    }

    #[test]
    fn short_config() {
        let Cli::Run(args) = parse(&["-c", "x.toml"]).unwrap() else {
            panic!("expected Cli::Run");
        };
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["--seed", "1", "-h"]).unwrap(), Cli::Help);
        assert_eq!(parse(&["--version"]).unwrap(), Cli::Version);
    }

    #[test]
    fn bad_args() {
        assert!(parse(&["--rounds", "0"]).is_err());
        assert!(parse(&["--tick-ms", "0"]).is_err());
        assert!(parse(&["--seed", "many"]).is_err());
        assert!(parse(&["extra"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }
}
