use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seedprop_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "seedprop")]
#[command(author, version, about = "Infer account labels from shared retweets")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Seed labels, one `account<TAB>label` per line
    seeds: Option<PathBuf>,

    /// Message corpus, one `account<TAB>message` per line
    corpus: Option<PathBuf>,

    /// Where to write the propagated labels
    output: Option<PathBuf>,

    /// Gold labels used to score the output
    gold: Option<PathBuf>,

    /// Votes an account must exceed to receive an inferred label
    #[arg(
        short,
        long,
        global = true,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    threshold: Option<u32>,

    /// Configuration file (defaults to ~/.config/seedprop/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Propagate seed labels through the corpus and write the result
    Propagate {
        seeds: PathBuf,
        corpus: PathBuf,
        output: PathBuf,
    },
    /// Score an existing label file against gold labels
    Evaluate { gold: PathBuf, produced: PathBuf },
}

/// What a parsed command line asks for, with the threshold already resolved
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Run {
        seeds: PathBuf,
        corpus: PathBuf,
        output: PathBuf,
        gold: PathBuf,
        threshold: u32,
    },
    Propagate {
        seeds: PathBuf,
        corpus: PathBuf,
        output: PathBuf,
        threshold: u32,
    },
    Evaluate {
        gold: PathBuf,
        produced: PathBuf,
    },
}

impl Cli {
    /// `--threshold` wins over the configured value
    fn resolve(self, config: &AppConfig) -> Result<Action> {
        let threshold = self.threshold.unwrap_or(config.propagation.threshold);

        match self.command {
            Some(Commands::Propagate {
                seeds,
                corpus,
                output,
            }) => Ok(Action::Propagate {
                seeds,
                corpus,
                output,
                threshold,
            }),
            Some(Commands::Evaluate { gold, produced }) => Ok(Action::Evaluate { gold, produced }),
            None => match (self.seeds, self.corpus, self.output, self.gold) {
                (Some(seeds), Some(corpus), Some(output), Some(gold)) => Ok(Action::Run {
                    seeds,
                    corpus,
                    output,
                    gold,
                    threshold,
                }),
                _ => bail!("Expected <SEEDS> <CORPUS> <OUTPUT> <GOLD>, or a subcommand (see --help)"),
            },
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) if !path.exists() => bail!("Config file not found: {}", path.display()),
        Some(path) => Ok(AppConfig::load_from(path)?),
        None => Ok(AppConfig::load()?),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = load_config(cli.config.as_deref())?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.resolve(&config)? {
        Action::Run {
            seeds,
            corpus,
            output,
            gold,
            threshold,
        } => commands::run::run(&seeds, &corpus, &output, &gold, threshold),
        Action::Propagate {
            seeds,
            corpus,
            output,
            threshold,
        } => commands::propagate::run(&seeds, &corpus, &output, threshold),
        Action::Evaluate { gold, produced } => commands::evaluate::run(&gold, &produced),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("seedprop").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_before_subcommand() {
        let cli = parse(&["--config", "cfg.toml", "propagate", "s.tsv", "c.tsv", "o.tsv"]);
        assert_eq!(cli.config.as_deref(), Some(Path::new("cfg.toml")));

        let action = cli.resolve(&AppConfig::default()).unwrap();
        assert_eq!(
            action,
            Action::Propagate {
                seeds: "s.tsv".into(),
                corpus: "c.tsv".into(),
                output: "o.tsv".into(),
                threshold: 5,
            }
        );
    }

    #[test]
    fn test_config_after_subcommand() {
        let cli = parse(&["evaluate", "g.tsv", "p.tsv", "-c", "cfg.toml"]);
        assert_eq!(cli.config.as_deref(), Some(Path::new("cfg.toml")));
        assert_eq!(
            cli.resolve(&AppConfig::default()).unwrap(),
            Action::Evaluate {
                gold: "g.tsv".into(),
                produced: "p.tsv".into(),
            }
        );
    }

    #[test]
    fn test_threshold_before_subcommand() {
        let config = AppConfig::parse("[propagation]\nthreshold = 9\n").unwrap();
        let cli = parse(&["-t", "3", "propagate", "s.tsv", "c.tsv", "o.tsv"]);
        assert!(matches!(
            cli.resolve(&config).unwrap(),
            Action::Propagate { threshold: 3, .. }
        ));
    }

    #[test]
    fn test_positional_workflow() {
        let cli = parse(&["s.tsv", "c.tsv", "o.tsv", "g.tsv", "--threshold", "7"]);
        assert_eq!(
            cli.resolve(&AppConfig::default()).unwrap(),
            Action::Run {
                seeds: "s.tsv".into(),
                corpus: "c.tsv".into(),
                output: "o.tsv".into(),
                gold: "g.tsv".into(),
                threshold: 7,
            }
        );
    }

    #[test]
    fn test_threshold_falls_back_to_config() {
        let config = AppConfig::parse("[propagation]\nthreshold = 9\n").unwrap();
        let cli = parse(&["--config", "cfg.toml", "s.tsv", "c.tsv", "o.tsv", "g.tsv"]);
        assert!(matches!(
            cli.resolve(&config).unwrap(),
            Action::Run { threshold: 9, .. }
        ));
    }

    #[test]
    fn test_incomplete_positionals_rejected() {
        let cli = parse(&["s.tsv", "c.tsv"]);
        assert!(cli.resolve(&AppConfig::default()).is_err());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let result = Cli::try_parse_from(["seedprop", "-t", "0", "s", "c", "o", "g"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_explicit_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.toml");
        assert!(load_config(Some(absent.as_path())).is_err());

        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[propagation]\nthreshold = 2\n").unwrap();
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.propagation.threshold, 2);
    }
}
