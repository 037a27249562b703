//! Version string helpers shared by the changelog components.
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

use crate::{error::ActionsError, result::Result};

/// Matches branches created by the backport tooling, capturing the number of
/// the pull request that was cherry-picked.
static BACKPORT_BRANCH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^backport-(?<pr>\d+)-to-v\d+\.\d+\.x$").unwrap()
});

/// Removes a single leading "v" from a version string.
pub fn strip_v(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// Parses a version, accepting an optional leading "v".
pub fn parse_version(version: &str) -> Result<Version> {
    let parsed =
        Version::parse(strip_v(version.trim())).map_err(ActionsError::from)?;
    Ok(parsed)
}

/// Release branch that holds the changelog for a version, `v{major}.{minor}.x`.
pub fn version_branch(version: &str) -> Result<String> {
    let parsed = parse_version(version)?;
    Ok(format!("v{}.{}.x", parsed.major, parsed.minor))
}

/// Returns the original pull request number encoded in a backport branch
/// name, or `None` if the branch does not follow that shape.
pub fn parse_backport_branch(branch: &str) -> Option<u64> {
    BACKPORT_BRANCH_REGEX
        .captures(branch)
        .and_then(|caps| caps["pr"].parse().ok())
}

/// Ordering key used when positioning version blocks. Pre-release and build
/// metadata are not part of it.
pub fn ordering_key(version: &Version) -> (u64, u64, u64) {
    (version.major, version.minor, version.patch)
}
