//! `claw-alert-check` binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use claw_alert_check::cli::{Cli, Commands};
use claw_alert_check::commands::{CheckCommand, InhibitCommand, RoutesCommand};
use claw_alert_check::output::OutputFormat;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), claw_alert_check::CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Check { files } => {
            CheckCommand::new().execute(&mut stdout, &format, &files)?;
        }
        Commands::Routes(args) => {
            RoutesCommand::new().execute(&mut stdout, &format, &args)?;
        }
        Commands::Inhibit(args) => {
            InhibitCommand::new().execute(&mut stdout, &format, &args)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use claw_alert_check::cli::Format;

    #[test]
    fn cli_parses_check() {
        let cli = Cli::parse_from(["claw-alert-check", "check", "am.yml"]);
        assert!(matches!(cli.command, Commands::Check { .. }));
    }

    #[test]
    fn cli_respects_format_flag() {
        let cli = Cli::parse_from(["claw-alert-check", "--format", "json", "check", "am.yml"]);
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn run_check_missing_file_fails() {
        let cli = Cli::parse_from(["claw-alert-check", "check", "/nonexistent/am.yml"]);
        assert!(run(cli).is_err());
    }
}
