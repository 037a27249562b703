//! GitHub access for milestones, pull requests and repository files.
//!
//! Commands talk to [`manager::ForgeManager`], which wraps a [`traits::Forge`]
//! implementation so it can be mocked in tests.

/// Connection and authentication settings for the remote.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Logging wrapper and higher level helpers over a forge.
pub mod manager;

/// Request and response types shared by forge implementations.
pub mod request;

/// Common traits for forge platform abstraction.
pub mod traits;
