use serde::{Deserialize, Serialize};

/// Label that marks an entry as coming from the enterprise edition.
pub const ENTERPRISE_LABEL: &str = "enterprise";

/// A merged pull request as seen by the changelog pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestInfo {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    /// Login of the pull request author, if known.
    pub author: Option<String>,
    /// Whether the author is a bot or app account.
    pub author_is_bot: bool,
    /// Name of the branch the pull request was opened from.
    pub head_ref: Option<String>,
    /// Set when the pull request was loaded from the enterprise repository.
    pub from_enterprise: bool,
}

impl PullRequestInfo {
    /// Case-insensitive label check.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.eq_ignore_ascii_case(name))
    }

    /// Enterprise entries are never linked in rendered output.
    pub fn is_enterprise(&self) -> bool {
        self.from_enterprise || self.has_label(ENTERPRISE_LABEL)
    }
}

/// Release notes for one version prior to rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogBody {
    /// Version without a leading "v".
    pub version: String,
    /// Release date formatted as `YYYY-MM-DD`.
    pub release_date: Option<String>,
    pub features: Vec<PullRequestInfo>,
    pub bugfixes: Vec<PullRequestInfo>,
    pub plugin_dev_changes: Vec<PullRequestInfo>,
    /// Pre-formatted breaking change notices.
    pub breaking_changes: Vec<String>,
    /// Pre-formatted deprecation notices.
    pub deprecation_changes: Vec<String>,
}

impl ChangelogBody {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
            && self.bugfixes.is_empty()
            && self.plugin_dev_changes.is_empty()
            && self.breaking_changes.is_empty()
            && self.deprecation_changes.is_empty()
    }
}

/// A titled group of entries parsed from a level-3 heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub entries: Vec<Entry>,
}

/// One bullet line of a changelog section.
///
/// The section parser only fills `title`; `issue` and `version` are left
/// for callers that know where the entry came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub title: String,
    pub issue: Option<u64>,
    pub version: Option<String>,
}

impl Entry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}
