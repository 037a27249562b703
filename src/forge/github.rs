//! Implements the Forge trait for Github
use async_trait::async_trait;
use color_eyre::eyre::eyre;
use log::*;
use octocrab::Octocrab;
use reqwest::StatusCode;

mod graphql;
mod types;

use crate::{
    changelog::types::PullRequestInfo,
    error::ActionsError,
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        github::{
            graphql::{
                MILESTONE_PRS_QUERY, MilestonePrsQueryVariables,
                MilestonePrsResult,
            },
            types::MilestoneResponse,
        },
        request::{
            GetFileContentRequest, Milestone, MilestonePrsRequest,
            MilestoneRequest,
        },
        traits::Forge,
    },
    result::Result,
};

/// GitHub forge implementation using Octocrab for API interactions with
/// milestones, pull requests and repository contents.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = format!("{}://api.{}", config.scheme, config.host);
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri)?
            .build()?;

        Ok(Self { config, instance })
    }

    fn repo_name<'a>(&'a self, repo: &'a Option<String>) -> &'a str {
        repo.as_deref().unwrap_or(&self.config.repo)
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn get_milestone(
        &self,
        req: MilestoneRequest,
    ) -> Result<Option<Milestone>> {
        let repo = self.repo_name(&req.repo);
        let route = format!("/repos/{}/{repo}/milestones", self.config.owner);
        let per_page = DEFAULT_PAGE_SIZE.to_string();
        let mut page = 1u32;

        loop {
            let page_str = page.to_string();
            let params = [
                ("state", "all"),
                ("per_page", per_page.as_str()),
                ("page", page_str.as_str()),
            ];

            let milestones: Vec<MilestoneResponse> = self
                .instance
                .get(&route, Some(&params))
                .await
                .map_err(ActionsError::from)?;

            let count = milestones.len();

            if let Some(found) =
                milestones.into_iter().find(|m| m.title == req.title)
            {
                info!(
                    "found milestone {} (#{}) in {repo}",
                    found.title, found.number
                );
                return Ok(Some(found.into()));
            }

            if count < DEFAULT_PAGE_SIZE as usize {
                break;
            }

            page += 1;
        }

        warn!("no milestone titled {} found in {repo}", req.title);

        Ok(None)
    }

    async fn get_milestone_pull_requests(
        &self,
        req: MilestonePrsRequest,
    ) -> Result<Vec<PullRequestInfo>> {
        let repo = self.repo_name(&req.repo).to_string();
        let from_enterprise = req.repo.is_some();
        let mut prs = vec![];
        let mut cursor = None;

        loop {
            let vars = MilestonePrsQueryVariables {
                owner: self.config.owner.clone(),
                repo: repo.clone(),
                milestone: req.milestone_number,
                first: DEFAULT_PAGE_SIZE,
                cursor: cursor.clone(),
            };

            let json = serde_json::json!({
              "query": MILESTONE_PRS_QUERY,
              "variables": vars,
            });

            let result: MilestonePrsResult = self
                .instance
                .graphql(&json)
                .await
                .map_err(ActionsError::from)?;

            if !result.errors.is_empty() {
                let messages = result
                    .errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<&str>>()
                    .join(", ");
                return Err(ActionsError::forge(messages).into());
            }

            let pull_requests = result
                .data
                .and_then(|d| d.repository)
                .and_then(|r| r.milestone)
                .map(|m| m.pull_requests)
                .ok_or_else(|| {
                    eyre!(
                        "milestone #{} not found in {repo}",
                        req.milestone_number
                    )
                })?;

            debug!(
                "fetched {} pull requests for milestone #{}",
                pull_requests.nodes.len(),
                req.milestone_number
            );

            prs.extend(
                pull_requests
                    .nodes
                    .into_iter()
                    .map(|node| node.into_pull_request(from_enterprise)),
            );

            match pull_requests.page_info.end_cursor {
                Some(end) if pull_requests.page_info.has_next_page => {
                    cursor = Some(end);
                }
                _ => break,
            }
        }

        info!(
            "found {} merged pull requests in {repo} for milestone #{}",
            prs.len(),
            req.milestone_number
        );

        Ok(prs)
    }

    async fn get_pull_request_author(
        &self,
        number: u64,
    ) -> Result<Option<String>> {
        let pr = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .get(number)
            .await
            .map_err(ActionsError::from)?;

        Ok(pr.user.map(|user| user.login))
    }

    async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<String>> {
        let path = req.path;
        let repos = self.instance.repos(&self.config.owner, &self.config.repo);
        let mut builder = repos.get_content().path(&path);

        if let Some(branch) = req.branch {
            builder = builder.r#ref(branch);
        }

        match builder.send().await {
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                info!("no file found for path: {path}");
                Ok(None)
            }
            Err(err) => {
                let msg = format!(
                    "encountered error getting file contents for path: {path}: {err}"
                );
                error!("{msg}");
                Err(eyre!(msg))
            }
            Ok(mut data) => {
                let items = data.take_items();

                if items.is_empty() {
                    info!("no file found for path: {path}");
                    return Ok(None);
                }

                if let Some(content) = items[0].decoded_content() {
                    Ok(Some(content))
                } else {
                    Err(eyre!("failed to decode file content for path: {path}"))
                }
            }
        }
    }
}
