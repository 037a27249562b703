//! Command execution for release-actions.
//!
//! Each command resolves its inputs from the CLI, builds the clients it
//! needs and then runs against the changelog core:
//!
//! - **generate**: milestone pull requests rendered and spliced into the
//!   changelog file
//! - **extract**: a single version's entry printed, written to a file or
//!   posted to the forum
//! - **export**: changelog entries exported as CSV

/// Helpers shared by the command implementations.
pub mod common;

/// CSV export of changelog entries.
pub mod export;

/// Extraction of a single version's changelog entry.
pub mod extract;

/// Changelog generation from a milestone.
pub mod generate;
