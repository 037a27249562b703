//! Manager that wraps forge implementations
use async_trait::async_trait;
use log::*;

use crate::{
    changelog::{render::AuthorLookup, types::PullRequestInfo},
    error::ActionsError,
    forge::{
        config::RemoteConfig,
        request::{
            GetFileContentRequest, Milestone, MilestonePrsRequest,
            MilestoneRequest,
        },
        traits::Forge,
    },
    result::Result,
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
        }
    }

    pub fn remote_config(&self) -> RemoteConfig {
        self.remote_config.clone()
    }

    pub async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<String>> {
        debug!("getting file content: {:?}", req);
        self.forge.get_file_content(req).await
    }

    /// Finds the milestone titled `title`, failing when it does not exist.
    pub async fn load_milestone(
        &self,
        repo: Option<String>,
        title: &str,
    ) -> Result<Milestone> {
        let milestone = self
            .forge
            .get_milestone(MilestoneRequest {
                repo: repo.clone(),
                title: title.to_string(),
            })
            .await?;

        milestone.ok_or_else(|| {
            let location = repo.unwrap_or_else(|| self.remote_config.path.clone());
            ActionsError::MilestoneNotFound(format!("{title} in {location}"))
                .into()
        })
    }

    pub async fn get_milestone_pull_requests(
        &self,
        req: MilestonePrsRequest,
    ) -> Result<Vec<PullRequestInfo>> {
        debug!(
            "getting pull requests for milestone #{} in {:?}",
            req.milestone_number, req.repo
        );
        self.forge.get_milestone_pull_requests(req).await
    }

    /// Merged pull requests of the milestone titled `title` in another
    /// repository of the same owner, marked as coming from that repository.
    /// A missing milestone there yields no pull requests.
    pub async fn load_external_pull_requests(
        &self,
        repo: &str,
        title: &str,
    ) -> Result<Vec<PullRequestInfo>> {
        let milestone = self
            .forge
            .get_milestone(MilestoneRequest {
                repo: Some(repo.to_string()),
                title: title.to_string(),
            })
            .await?;

        let Some(milestone) = milestone else {
            warn!("no milestone {title} in {repo}: skipping its pull requests");
            return Ok(vec![]);
        };

        self.get_milestone_pull_requests(MilestonePrsRequest {
            repo: Some(repo.to_string()),
            milestone_number: milestone.number,
        })
        .await
    }
}

#[async_trait]
impl AuthorLookup for ForgeManager {
    async fn original_author(&self, pr_number: u64) -> Result<Option<String>> {
        debug!("looking up original author of #{pr_number}");
        self.forge.get_pull_request_author(pr_number).await
    }
}
