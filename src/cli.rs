use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::auth::Token;
use crate::error::{AlertError, Result};
use crate::models::RepositoryIdentity;
use crate::output::ActionsOutput;
use crate::providers::github::{GitHubClient, DEFAULT_API_URL};
use crate::report::{self, ActionInputs, RunOutcome, DEFAULT_LOOKBACK_DAYS};

/// Every option falls back to the variable the Actions runner sets for it.
#[derive(Parser)]
#[command(name = "dependabot-alerts")]
#[command(author, version, about = "Reports failed Dependabot workflow runs", long_about = None)]
pub struct Cli {
    /// GitHub token used to query the Actions API
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    token: Token,

    /// Number of days to look back for failed runs
    #[arg(long, env = "INPUT_LOOKBACK_DAYS")]
    lookback_days: Option<String>,

    /// Fail the step when failures are found (only "true" enables it)
    #[arg(long, env = "INPUT_FAIL_ON_ERROR", default_value = "false")]
    fail_on_error: String,

    /// Repository to check (e.g., "owner/name")
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: RepositoryIdentity,

    /// GitHub API URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File that receives step outputs (defaults to stdout commands)
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,
}

impl Cli {
    fn inputs(&self) -> Result<ActionInputs> {
        if self.token.is_empty() {
            return Err(AlertError::Config(
                "Input required and not supplied: github_token".to_string(),
            ));
        }

        // The runner passes unset inputs as empty strings
        let lookback_days = self
            .lookback_days
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(DEFAULT_LOOKBACK_DAYS)
            .to_string();

        Ok(ActionInputs {
            lookback_days,
            fail_on_error: self.fail_on_error == "true",
            ..ActionInputs::new(self.token.clone())
        })
    }

    pub async fn execute(self) -> Result<RunOutcome> {
        let inputs = self.inputs()?;
        info!("Checking Dependabot workflow runs for {}", self.repository);

        let api_url = self.api_url;
        let mut sink = ActionsOutput::new(self.output_file);

        report::run(
            inputs,
            &self.repository,
            |token| GitHubClient::new(&api_url, token),
            &mut sink,
        )
        .await
    }
}
