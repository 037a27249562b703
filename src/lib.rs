//! Changelog automation for GitHub milestones.
//!
//! Generates version entries from merged pull requests, keeps them in a
//! marker-delimited changelog file and reads them back out again.
pub mod changelog;
pub mod cli;
pub mod command;
pub mod error;
pub mod forge;
pub mod forum;
pub mod result;

pub use result::Result;

#[cfg(test)]
pub mod test_helpers;
