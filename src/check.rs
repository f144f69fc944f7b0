//! Queries the host for failed workflow runs triggered by Dependabot.
//!
//! All filtering (actor, status, creation date) is pushed down to the host;
//! this module only builds the query and shapes the response.

use chrono::{Days, NaiveDate, Utc};

use crate::error::Result;
use crate::models::{CheckResult, FailureRecord, LookbackWindow, RepositoryIdentity};
use crate::providers::{HostClient, WorkflowRun, WorkflowRunQuery};

pub const DEPENDABOT_ACTOR: &str = "dependabot[bot]";
pub const FAILURE_STATUS: &str = "failure";

const UNKNOWN_RUN_NAME: &str = "Unknown";

/// First day included in the window: `today - window` days.
pub fn cutoff_date(today: NaiveDate, window: LookbackWindow) -> NaiveDate {
    let earliest = NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN);
    today
        .checked_sub_days(Days::new(u64::from(window.days())))
        .map_or(earliest, |date| date.max(earliest))
}

/// Inclusive host date filter, e.g. `>=2025-01-01`.
pub fn created_filter(cutoff: NaiveDate) -> String {
    format!(">={}", cutoff.format("%Y-%m-%d"))
}

pub fn build_query(today: NaiveDate, window: LookbackWindow) -> WorkflowRunQuery {
    WorkflowRunQuery {
        actor: DEPENDABOT_ACTOR.to_string(),
        status: FAILURE_STATUS.to_string(),
        created: created_filter(cutoff_date(today, window)),
    }
}

impl From<WorkflowRun> for FailureRecord {
    fn from(run: WorkflowRun) -> Self {
        Self {
            id: run.id,
            name: run.name.unwrap_or_else(|| UNKNOWN_RUN_NAME.to_string()),
            html_url: run.html_url,
            created_at: run.created_at,
        }
    }
}

/// Checks the last `window` days (counted from today, UTC).
pub async fn check_dependabot_failures<C>(
    client: &C,
    repository: &RepositoryIdentity,
    window: LookbackWindow,
) -> Result<CheckResult>
where
    C: HostClient + Sync + ?Sized,
{
    check_dependabot_failures_since(client, repository, window, Utc::now().date_naive()).await
}

pub async fn check_dependabot_failures_since<C>(
    client: &C,
    repository: &RepositoryIdentity,
    window: LookbackWindow,
    today: NaiveDate,
) -> Result<CheckResult>
where
    C: HostClient + Sync + ?Sized,
{
    let query = build_query(today, window);
    let runs = client.list_workflow_runs(repository, &query).await?;

    let failures = runs.into_iter().map(FailureRecord::from).collect();

    Ok(CheckResult::from_failures(failures))
}
