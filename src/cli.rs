//! CLI argument parsing and remote configuration.
use clap::{Parser, Subcommand};
use color_eyre::eyre::{ContextCompat, eyre};
use git_url_parse::GitUrl;
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    forge::config::RemoteConfig, forum::discourse::ForumConfig,
    result::Result,
};

pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Global CLI arguments for forge configuration and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "", global = true)]
    /// GitHub repository URL (https://github.com/owner/repo).
    pub github_repo: String,

    #[arg(long, default_value = "", global = true)]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Changelog subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the changelog entry for a milestone and splice it into the
    /// changelog file.
    Generate(GenerateArgs),

    /// Print the changelog entry of a single version.
    Extract(ExtractArgs),

    /// Export changelog entries as CSV.
    ExportCsv(ExportArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(long)]
    /// Version to generate the changelog for, with or without a leading v.
    pub version: String,

    #[arg(long)]
    /// Milestone title. Defaults to the version.
    pub milestone: Option<String>,

    #[arg(long)]
    /// Release date (YYYY-MM-DD). Defaults to the milestone's date.
    pub release_date: Option<String>,

    #[arg(long, default_value = DEFAULT_CHANGELOG_FILE)]
    /// Changelog file to update.
    pub changelog_file: PathBuf,

    #[arg(long)]
    /// Repository under the same owner whose milestone pull requests are
    /// listed as enterprise entries.
    pub enterprise_repo: Option<String>,

    #[arg(long, default_value_t = false)]
    /// Include pull requests without the "add to changelog" label.
    pub include_all: bool,

    #[arg(long, default_value_t = false)]
    /// Print the rendered entry instead of writing the changelog file.
    pub dry_run: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long)]
    /// Version to extract, with or without a leading v.
    pub version: String,

    #[arg(long)]
    /// Local changelog file. When unset the changelog is read from the
    /// version's release branch.
    pub changelog_file: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Drop the version heading from the output.
    pub remove_heading: bool,

    #[arg(long)]
    /// Write the entry to this file instead of stdout.
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    /// Post the entry as a new forum topic.
    pub post_to_forum: bool,

    #[arg(long, default_value = "")]
    /// Forum base URL.
    pub forum_url: String,

    #[arg(long, default_value = "")]
    /// Forum API key. Falls back to DISCOURSE_API_KEY env var.
    pub forum_api_key: String,

    #[arg(long, default_value = "")]
    /// Forum user to post as. Falls back to DISCOURSE_API_USERNAME env var.
    pub forum_user: String,

    #[arg(long)]
    /// Forum category id.
    pub forum_category: Option<u64>,

    #[arg(long)]
    /// Topic title. Defaults to "Release notes for <version>".
    pub forum_title: Option<String>,
}

impl ExtractArgs {
    /// Forum connection settings with environment fallbacks.
    pub fn forum_config(&self) -> Result<ForumConfig> {
        if self.forum_url.is_empty() {
            return Err(eyre!("must set forum url to post to the forum"));
        }

        let api_key = value_or_env(&self.forum_api_key, "DISCOURSE_API_KEY");
        let username = value_or_env(&self.forum_user, "DISCOURSE_API_USERNAME");

        Ok(ForumConfig {
            url: self.forum_url.clone(),
            api_key: SecretString::from(api_key),
            username,
        })
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(long, default_value = DEFAULT_CHANGELOG_FILE)]
    /// Changelog file to read.
    pub changelog_file: PathBuf,

    #[arg(long = "versions")]
    /// Versions to export. Repeat for several; all versions when unset.
    pub versions: Vec<String>,

    #[arg(long)]
    /// Write CSV to this file instead of stdout.
    pub output: Option<PathBuf>,
}

impl Args {
    /// Configure remote repository connection from CLI arguments.
    pub fn get_remote(&self) -> Result<RemoteConfig> {
        if self.github_repo.is_empty() {
            return Err(eyre!("must configure a github repo"));
        }

        get_github_remote(&self.github_repo, &self.github_token)
    }
}

fn value_or_env(value: &str, var: &str) -> String {
    if !value.is_empty() {
        return value.to_string();
    }

    env::var(var).unwrap_or_default()
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(eyre!(
            "only http and https schemes are supported for repo urls"
        )),
    }
}

/// Configure GitHub remote with URL parsing and token resolution.
fn get_github_remote(github_repo: &str, github_token: &str) -> Result<RemoteConfig> {
    let parsed = GitUrl::parse(github_repo)?;

    validate_scheme(parsed.scheme)?;

    let mut token = github_token.to_string();

    if token.is_empty()
        && let Some(parsed_token) = parsed.token
    {
        token = parsed_token;
    }

    if token.is_empty()
        && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
    {
        token = env_var_token;
    }

    if token.is_empty() {
        return Err(eyre!("must set github token"));
    }

    let host = parsed
        .host
        .ok_or(eyre!("unable to parse host from github repo"))?;

    let owner = parsed
        .owner
        .ok_or(eyre!("unable to parse owner from github repo"))?;

    let project_path = parsed
        .path
        .strip_prefix("/")
        .wrap_err("failed to process project path")?
        .to_string();

    let profile_link_base_url = format!("{}://{}", parsed.scheme, host);

    let repo_link_base_url =
        format!("{}/{}/{}", profile_link_base_url, owner, parsed.name);

    Ok(RemoteConfig {
        host,
        scheme: parsed.scheme.to_string(),
        owner,
        repo: parsed.name,
        path: project_path,
        token: SecretString::from(token),
        repo_link_base_url,
        profile_link_base_url,
    })
}
