//! Traits related to remote git forges
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    changelog::types::PullRequestInfo,
    forge::{
        config::RemoteConfig,
        request::{
            GetFileContentRequest, Milestone, MilestonePrsRequest,
            MilestoneRequest,
        },
    },
    result::Result,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;
    async fn get_milestone(
        &self,
        req: MilestoneRequest,
    ) -> Result<Option<Milestone>>;
    async fn get_milestone_pull_requests(
        &self,
        req: MilestonePrsRequest,
    ) -> Result<Vec<PullRequestInfo>>;
    async fn get_pull_request_author(&self, number: u64)
    -> Result<Option<String>>;
    async fn get_file_content(
        &self,
        req: GetFileContentRequest,
    ) -> Result<Option<String>>;
}
