use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    changelog::types::PullRequestInfo,
    forge::{github::graphql::PrNode, request::Milestone},
};

/// Milestone as returned by the REST milestones endpoint.
#[derive(Debug, Deserialize)]
pub struct MilestoneResponse {
    pub number: u64,
    pub title: String,
    pub due_on: Option<String>,
    pub closed_at: Option<String>,
}

fn parse_date(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|d| d.with_timezone(&Utc))
}

impl From<MilestoneResponse> for Milestone {
    fn from(value: MilestoneResponse) -> Self {
        Self {
            number: value.number,
            due_on: parse_date(value.due_on.as_deref()),
            closed_at: parse_date(value.closed_at.as_deref()),
            title: value.title,
        }
    }
}

impl PrNode {
    pub fn into_pull_request(self, from_enterprise: bool) -> PullRequestInfo {
        let author_is_bot =
            self.author.as_ref().map(|a| a.is_bot()).unwrap_or_default();

        PullRequestInfo {
            number: self.number,
            title: self.title,
            body: self.body.unwrap_or_default(),
            labels: self
                .labels
                .map(|l| l.nodes.into_iter().map(|n| n.name).collect())
                .unwrap_or_default(),
            author: self.author.map(|a| a.login),
            author_is_bot,
            head_ref: self.head_ref_name,
            from_enterprise,
        }
    }
}
