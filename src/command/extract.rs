//! Extraction of a single version's changelog entry.
use color_eyre::eyre::eyre;
use log::*;
use std::fs;

use crate::{
    changelog::{
        extract::{ExtractOptions, extract_content_for_version},
        version::{strip_v, version_branch},
    },
    cli::{self, DEFAULT_CHANGELOG_FILE, ExtractArgs},
    command::common,
    forge::{manager::ForgeManager, request::GetFileContentRequest},
    forum::{
        CreateTopicRequest, Forum, Topic,
        discourse::Discourse,
    },
    result::Result,
};

/// Execute extract command, reading the changelog locally when a file is
/// given and from the version's release branch otherwise.
pub async fn execute(args: &cli::Args, cmd: &ExtractArgs) -> Result<()> {
    let content = match &cmd.changelog_file {
        Some(path) => {
            info!("reading changelog from {}", path.display());
            fs::read_to_string(path)?
        }
        None => {
            let forge = args.get_remote()?.get_forge()?;
            fetch_changelog(&forge, &cmd.version).await?
        }
    };

    let notes = extract_notes(&content, cmd)?;

    common::write_output(cmd.output.as_deref(), &notes)?;

    if cmd.post_to_forum {
        let forum = Discourse::new(cmd.forum_config()?)?;
        post_notes(&forum, cmd, &notes).await?;
    }

    Ok(())
}

/// Reads the changelog from the release branch of `version`.
pub async fn fetch_changelog(
    forge: &ForgeManager,
    version: &str,
) -> Result<String> {
    let branch = version_branch(version)?;

    info!("reading {DEFAULT_CHANGELOG_FILE} from branch {branch}");

    forge
        .get_file_content(GetFileContentRequest {
            branch: Some(branch.clone()),
            path: DEFAULT_CHANGELOG_FILE.to_string(),
        })
        .await?
        .ok_or_else(|| {
            eyre!("no {DEFAULT_CHANGELOG_FILE} found on branch {branch}")
        })
}

/// The entry for `cmd.version`, failing when the changelog has no block for
/// it.
pub fn extract_notes(content: &str, cmd: &ExtractArgs) -> Result<String> {
    let options = ExtractOptions {
        remove_heading: cmd.remove_heading,
    };

    extract_content_for_version(content, &cmd.version, options).ok_or_else(
        || eyre!("no changelog entry found for version {}", strip_v(&cmd.version)),
    )
}

/// Posts `notes` as a new topic.
pub async fn post_notes(
    forum: &dyn Forum,
    cmd: &ExtractArgs,
    notes: &str,
) -> Result<Topic> {
    let title = cmd.forum_title.clone().unwrap_or_else(|| {
        format!("Release notes for {}", strip_v(&cmd.version))
    });

    forum
        .create_topic(CreateTopicRequest {
            title,
            raw: notes.to_string(),
            category: cmd.forum_category,
        })
        .await
}
