use log::info;

use crate::auth::Token;
use crate::check::check_dependabot_failures;
use crate::error::Result;
use crate::models::{CheckResult, LookbackWindow, RepositoryIdentity};
use crate::output::OutputSink;
use crate::providers::HostClient;

pub const DEFAULT_LOOKBACK_DAYS: &str = "7";

/// Action inputs as read from the environment.
#[derive(Debug, Clone)]
pub struct ActionInputs {
    pub token: Token,
    /// Raw text, validated by [`run`] before any request is made.
    pub lookback_days: String,
    pub fail_on_error: bool,
}

impl ActionInputs {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            lookback_days: DEFAULT_LOOKBACK_DAYS.to_string(),
            fail_on_error: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Passed,
    /// Failures were found and `fail_on_error` is set.
    Failed(String),
}

/// Validates the inputs, runs the check once and reports the result.
///
/// `connect` is only called once the lookback window is valid. Errors from
/// the host propagate unchanged and leave all outputs unset.
pub async fn run<C, F, S>(
    inputs: ActionInputs,
    repository: &RepositoryIdentity,
    connect: F,
    sink: &mut S,
) -> Result<RunOutcome>
where
    C: HostClient + Sync,
    F: FnOnce(Token) -> Result<C>,
    S: OutputSink + ?Sized,
{
    let window = LookbackWindow::parse(&inputs.lookback_days)?;
    let client = connect(inputs.token)?;

    info!(
        "Checking {repository} for Dependabot failures in the last {} day(s)",
        window.days()
    );
    let result = check_dependabot_failures(&client, repository, window).await?;

    report(&result, inputs.fail_on_error, sink)
}

pub fn report<S>(result: &CheckResult, fail_on_error: bool, sink: &mut S) -> Result<RunOutcome>
where
    S: OutputSink + ?Sized,
{
    let failures_json = serde_json::to_string(&result.failures)?;

    sink.set_output("failure_count", &result.failure_count.to_string())?;
    sink.set_output("has_failures", if result.has_failures { "true" } else { "false" })?;
    sink.set_output("failures_json", &failures_json)?;

    if !result.has_failures {
        sink.info("No Dependabot workflow failures found")?;
        return Ok(RunOutcome::Passed);
    }

    let summary = format!(
        "Found {} Dependabot workflow failure(s)",
        result.failure_count
    );
    sink.warning(&summary)?;
    for failure in &result.failures {
        sink.warning(&format!("  - {}: {}", failure.name, failure.html_url))?;
    }

    if fail_on_error {
        sink.set_failed(&summary)?;
        return Ok(RunOutcome::Failed(summary));
    }

    Ok(RunOutcome::Passed)
}
