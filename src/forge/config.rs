//! Configuration for the GitHub connection.
use secrecy::SecretString;

use crate::{
    forge::{github::Github, manager::ForgeManager},
    result::Result,
};

/// Default page size for paginated queries
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Remote repository connection configuration for authenticating and
/// interacting with GitHub.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote forge host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Full repository path ("owner/repo").
    pub path: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Web URL of the repository, used for issue links.
    pub repo_link_base_url: String,
    /// Base URL for user profile links.
    pub profile_link_base_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            scheme: "".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            path: "".to_string(),
            token: SecretString::from("".to_string()),
            repo_link_base_url: "".to_string(),
            profile_link_base_url: "".to_string(),
        }
    }
}

impl RemoteConfig {
    /// Create a forge client for this remote.
    pub fn get_forge(&self) -> Result<ForgeManager> {
        let forge = Github::new(self.clone())?;
        Ok(ForgeManager::new(Box::new(forge)))
    }
}
