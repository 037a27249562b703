//! Common test helper functions shared across test modules.
use secrecy::SecretString;

use crate::{changelog::types::PullRequestInfo, forge::config::RemoteConfig};

/// Creates a test RemoteConfig with sensible defaults.
///
/// # Example
/// ```ignore
/// let config = create_test_remote_config();
/// ```
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        host: "github.com".to_string(),
        scheme: "https".to_string(),
        owner: "test".to_string(),
        repo: "repo".to_string(),
        path: "test/repo".to_string(),
        token: SecretString::from("test-token".to_string()),
        repo_link_base_url: "https://github.com/test/repo".to_string(),
        profile_link_base_url: "https://github.com".to_string(),
    }
}

/// Creates a merged pull request carrying the changelog label plus `labels`.
pub fn create_test_pull_request(
    number: u64,
    title: &str,
    labels: &[&str],
) -> PullRequestInfo {
    let mut all_labels = vec!["add to changelog".to_string()];
    all_labels.extend(labels.iter().map(|l| l.to_string()));

    PullRequestInfo {
        number,
        title: title.to_string(),
        labels: all_labels,
        author: Some("alice".to_string()),
        ..Default::default()
    }
}
