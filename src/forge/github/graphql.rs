use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

pub const MILESTONE_PRS_QUERY: &str = r#"
query MilestonePullRequests(
    $owner: String!
    $repo: String!
    $milestone: Int!
    $first: Int!
    $cursor: String
) {
    repository(owner: $owner, name: $repo) {
        milestone(number: $milestone) {
            pullRequests(first: $first, after: $cursor, states: [MERGED]) {
                pageInfo {
                    hasNextPage
                    endCursor
                }
                nodes {
                    number
                    title
                    body
                    headRefName
                    author {
                        __typename
                        login
                    }
                    labels(first: 50) {
                        nodes {
                            name
                        }
                    }
                }
            }
        }
    }
}"#;

#[derive(Debug, Serialize)]
pub struct MilestonePrsQueryVariables {
    pub owner: String,
    pub repo: String,
    pub milestone: u64,
    pub first: u8,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PrAuthor {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub login: String,
}

impl PrAuthor {
    pub fn is_bot(&self) -> bool {
        self.typename == "Bot" || self.login.ends_with("[bot]")
    }
}

#[derive(Debug, Deserialize)]
pub struct PrLabel {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PrLabels {
    pub nodes: Vec<PrLabel>,
}

#[derive(Debug, Deserialize)]
pub struct PrNode {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(rename = "headRefName")]
    pub head_ref_name: Option<String>,
    pub author: Option<PrAuthor>,
    pub labels: Option<PrLabels>,
}

#[derive(Debug, Deserialize)]
pub struct MilestonePullRequests {
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    pub nodes: Vec<PrNode>,
}

#[derive(Debug, Deserialize)]
pub struct MilestoneNode {
    #[serde(rename = "pullRequests")]
    pub pull_requests: MilestonePullRequests,
}

#[derive(Debug, Deserialize)]
pub struct MilestoneRepository {
    pub milestone: Option<MilestoneNode>,
}

#[derive(Debug, Deserialize)]
pub struct MilestonePrsData {
    pub repository: Option<MilestoneRepository>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct MilestonePrsResult {
    pub data: Option<MilestonePrsData>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}
