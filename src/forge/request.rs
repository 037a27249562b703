use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to read a file from the repository.
pub struct GetFileContentRequest {
    /// Branch to read from, the default branch when `None`.
    pub branch: Option<String>,
    /// Path relative to the repository root.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to find a milestone by title.
pub struct MilestoneRequest {
    /// Repository under the configured owner, the configured repository when
    /// `None`.
    pub repo: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request for the merged pull requests of a milestone.
pub struct MilestonePrsRequest {
    pub repo: Option<String>,
    pub milestone_number: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A repository milestone.
pub struct Milestone {
    pub number: u64,
    pub title: String,
    pub due_on: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Milestone {
    /// Release date of the milestone as `YYYY-MM-DD`: when it was closed, or
    /// else when it is due.
    pub fn release_date(&self) -> Option<String> {
        self.closed_at
            .or(self.due_on)
            .map(|date| date.format("%Y-%m-%d").to_string())
    }
}
