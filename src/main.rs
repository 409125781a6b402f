//! CLI entry point and command dispatch for textecho.

mod cmd;

use anyhow::Result;
use clap::{ArgGroup, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cmd::check::Verdict;
use cmd::ui::{Output, OutputMode};

#[derive(Parser)]
#[command(name = "textecho")]
#[command(version)]
#[command(about = "Validate text locally and remotely, then echo it back", long_about = None)]
struct Cli {
    /// Use this config file instead of the global and project configs
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log debug output to stderr (overridden by TEXTECHO_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Emit one JSON object per line
    #[arg(long, global = true, conflicts_with = "quiet")]
    json: bool,
    /// Only print results and errors
    #[arg(long, short, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single text and print the outcome
    ///
    /// Exits with status 1 when validation fails.
    #[command(group(ArgGroup::new("verdict").args(["accept", "reject"])))]
    Check {
        /// Text to validate
        text: String,
        /// Seed the simulated remote for a reproducible result
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
        /// Force the simulated remote to accept
        #[arg(long)]
        accept: bool,
        /// Force the simulated remote to reject
        #[arg(long)]
        reject: bool,
    },
    /// Run an interactive session reading lines from stdin
    ///
    /// Each line replaces the input and submits it. `:clear`, `:reset` and
    /// `:quit` are commands.
    Session,
    /// Print the effective configuration
    Config,
    /// Show version information (with --verbose, build information too)
    Version,
    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let out = Output::new(OutputMode::from_flags(cli.json, cli.quiet));

    match cli.command {
        Commands::Check {
            text,
            seed,
            accept,
            reject,
        } => {
            let mut config = cmd::load_config(cli.config.as_deref())?;
            let verdict = match (accept, reject) {
                (true, _) => Some(Verdict::Accept),
                (_, true) => Some(Verdict::Reject),
                _ => None,
            };
            cmd::check::apply_overrides(&mut config, seed, verdict);
            if !cmd::check::cmd_check(&config, &text, &out).await? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Session => {
            let config = cmd::load_config(cli.config.as_deref())?;
            cmd::session::cmd_session(&config, &out).await
        }
        Commands::Config => {
            let config = cmd::load_config(cli.config.as_deref())?;
            cmd::config::cmd_config(&config, &out)
        }
        Commands::Version => cmd_version(cli.verbose),
        Commands::Completion { shell } => cmd_completion(shell),
    }
}

/// Install the stderr log subscriber. `TEXTECHO_LOG` takes precedence over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("TEXTECHO_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Generate shell completion script
fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "textecho", &mut io::stdout());
    Ok(())
}

fn cmd_version(verbose: bool) -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    println!("textecho {}", VERSION);

    if verbose {
        const GIT_SHA: &str = env!("GIT_SHA");
        const BUILD_DATE: &str = env!("BUILD_DATE");
        println!("commit: {}", GIT_SHA);
        println!("built: {}", BUILD_DATE);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_accept_and_reject_conflict() {
        let parsed = Cli::try_parse_from(["textecho", "check", "Hello", "--accept", "--reject"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["textecho", "check", "Hello", "--json", "--seed", "4"])
            .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Check { text, seed, .. } => {
                assert_eq!(text, "Hello");
                assert_eq!(seed, Some(4));
            }
            _ => panic!("expected check"),
        }
    }
}
