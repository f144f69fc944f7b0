mod auth;
mod check;
mod cli;
mod error;
mod models;
mod output;
mod providers;
mod report;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use cli::Cli;
use log::{error, info};
use report::RunOutcome;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let result = run().await;
    ExitCode::from(finish(result, &mut std::io::stdout()))
}

async fn run() -> Result<RunOutcome> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return Err(e.into()),
    };

    info!("Starting dependabot-alerts");
    let outcome = cli.execute().await?;

    Ok(outcome)
}

/// Maps the run result to a process exit code, reporting errors to the
/// runner as an `::error::` annotation.
fn finish(result: Result<RunOutcome>, out: &mut impl Write) -> u8 {
    match result {
        Ok(RunOutcome::Passed) => 0,
        Ok(RunOutcome::Failed(_)) => 1,
        Err(e) => {
            error!("{e}");
            if let Err(write_err) = writeln!(out, "::error::{}", output::escape_data(&e.to_string()))
            {
                error!("Failed to write error annotation: {write_err}");
            }
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::error::AlertError;

    fn finish_captured(result: Result<RunOutcome>) -> (u8, String) {
        let mut out = Vec::new();
        let code = finish(result, &mut out);
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_passed_exits_zero_silently() {
        assert_eq!(finish_captured(Ok(RunOutcome::Passed)), (0, String::new()));
    }

    #[test]
    fn test_policy_failure_exits_non_zero() {
        let outcome = RunOutcome::Failed("Found 2 Dependabot workflow failure(s)".to_string());

        // The driver already emitted its own `::error::` line
        assert_eq!(finish_captured(Ok(outcome)), (1, String::new()));
    }

    #[test]
    fn test_error_becomes_annotation_with_host_message() {
        let err = AlertError::Api {
            status: StatusCode::FORBIDDEN,
            message: "API rate limit exceeded".to_string(),
        };

        let (code, out) = finish_captured(Err(err.into()));

        assert_eq!(code, 1);
        assert_eq!(out, "::error::API rate limit exceeded\n");
    }

    #[test]
    fn test_invalid_lookback_becomes_annotation() {
        let err = AlertError::InvalidLookbackDays("not-a-number".to_string());

        let (code, out) = finish_captured(Err(err.into()));

        assert_eq!(code, 1);
        assert_eq!(
            out,
            "::error::Invalid lookback_days: \"not-a-number\" - must be a positive integer\n"
        );
    }

    #[test]
    fn test_argument_errors_become_single_line_annotation() {
        let err = Cli::try_parse_from([
            "dependabot-alerts",
            "--token",
            "fake-token",
            "--repository",
            "no-slash",
        ])
        .err()
        .unwrap();

        let (code, out) = finish_captured(Err(err.into()));

        assert_eq!(code, 1);
        assert!(out.starts_with("::error::"), "{out}");
        assert!(out.contains("no-slash"), "{out}");
        assert_eq!(out.lines().count(), 1);
    }
}
