//! Changelog generation, extraction and export.
//!
//! Changelog files hold one Markdown block per version, each wrapped in
//! `<!-- {version} START -->` / `<!-- {version} END -->` marker lines with
//! the newest version first. The pipeline is:
//!
//! 1. [`classify`] sorts a milestone's merged pull requests into a
//!    [`types::ChangelogBody`].
//! 2. [`render`] turns the body into Markdown.
//! 3. [`splice`] replaces or inserts that Markdown in the changelog file.
//!
//! Going the other way, [`extract`] pulls a version's block back out and
//! [`sections`] parses it into entries, which [`export`] writes as CSV.

/// Pull request classification into changelog groups.
pub mod classify;

/// CSV export of historical entries.
pub mod export;

/// Version block extraction.
pub mod extract;

/// Markdown rendering of release notes.
pub mod render;

/// Markdown section parsing.
pub mod sections;

/// Replace-or-insert of version blocks.
pub mod splice;

/// Shared changelog data types.
pub mod types;

/// Version string helpers.
pub mod version;
