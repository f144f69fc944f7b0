use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::auth::Token;
use crate::error::{AlertError, Result};
use crate::models::RepositoryIdentity;
use crate::providers::{HostClient, WorkflowRun, WorkflowRunQuery};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
// GitHub's maximum page size; only the first page is requested.
const PER_PAGE: u32 = 100;

#[derive(Debug, Deserialize)]
struct WorkflowRunsDto {
    workflow_runs: Vec<WorkflowRun>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDto {
    message: String,
}

pub struct GitHubClient {
    client: Client,
    api_url: Url,
    token: Token,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Token) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("dependabot-alerts/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AlertError::Config(format!("Failed to create HTTP client: {e}")))?;

        // Trailing slash so `join` appends instead of replacing the last segment
        let api_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| AlertError::Config(format!("Invalid API base URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(self.token.as_str())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    fn workflow_runs_url(&self, repository: &RepositoryIdentity) -> Result<Url> {
        self.api_url
            .join(&format!(
                "repos/{}/{}/actions/runs",
                repository.owner, repository.name
            ))
            .map_err(|e| AlertError::Config(format!("Invalid workflow runs URL: {e}")))
    }
}

#[async_trait]
impl HostClient for GitHubClient {
    async fn list_workflow_runs(
        &self,
        repository: &RepositoryIdentity,
        query: &WorkflowRunQuery,
    ) -> Result<Vec<WorkflowRun>> {
        let url = self.workflow_runs_url(repository)?;
        debug!(
            "Listing workflow runs for {repository} (actor={}, status={}, created={})",
            query.actor, query.status, query.created
        );

        let request = self.client.get(url).query(&[
            ("actor", query.actor.as_str()),
            ("status", query.status.as_str()),
            ("created", query.created.as_str()),
        ]);
        let request = self.auth_request(request.query(&[("per_page", PER_PAGE)]));

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let message = serde_json::from_str::<ApiErrorDto>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            debug!("GitHub responded {status}: {message}");
            return Err(AlertError::Api { status, message });
        }

        let runs = response.json::<WorkflowRunsDto>().await?.workflow_runs;
        debug!("GitHub returned {} workflow runs", runs.len());

        Ok(runs)
    }
}
