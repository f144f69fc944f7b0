pub mod github;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::models::RepositoryIdentity;

/// Filters pushed down to the host's workflow-run listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRunQuery {
    pub actor: String,
    pub status: String,
    /// Date filter in host syntax, e.g. `>=2025-01-01`.
    pub created: String,
}

/// Workflow run as returned by the host. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    pub html_url: String,
    pub created_at: String,
}

#[async_trait]
pub trait HostClient {
    async fn list_workflow_runs(
        &self,
        repository: &RepositoryIdentity,
        query: &WorkflowRunQuery,
    ) -> Result<Vec<WorkflowRun>>;
}
