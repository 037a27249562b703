//! Publishing release notes to the community forum.
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::result::Result;

/// Discourse API client.
pub mod discourse;

/// A new forum topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTopicRequest {
    pub title: String,
    /// Markdown body of the first post.
    pub raw: String,
    /// Category id, the forum default when `None`.
    pub category: Option<u64>,
}

/// A topic created on the forum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: u64,
    pub url: String,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forum: Send + Sync {
    async fn create_topic(&self, req: CreateTopicRequest) -> Result<Topic>;
}
