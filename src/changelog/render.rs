//! Renders a [`ChangelogBody`] into the Markdown stored in the changelog.
use async_trait::async_trait;
use derive_builder::Builder;
use log::*;
use regex::Regex;
use std::sync::LazyLock;

#[cfg(test)]
use mockall::automock;

use crate::{
    changelog::{
        types::{ChangelogBody, PullRequestInfo},
        version::{parse_backport_branch, strip_v},
    },
    result::Result,
};

pub const FEATURES_TITLE: &str = "Features and enhancements";
pub const BUGFIXES_TITLE: &str = "Bug fixes";
pub const BREAKING_TITLE: &str = "Breaking changes";
pub const DEPRECATIONS_TITLE: &str = "Deprecations";
pub const PLUGIN_DEV_TITLE: &str = "Plugin development fixes & changes";

/// Default base for author profile links.
pub const DEFAULT_PROFILE_URL: &str = "https://github.com";

/// Matches a leading release stream marker such as `[v9.4.x]` or `[Chore]:`.
static STREAM_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[^\]]*\]:?\s*").unwrap());

/// Resolves the real author of a pull request that a bot opened on
/// somebody's behalf.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthorLookup: Send + Sync {
    /// Login of the author of pull request `pr_number`, if it has one.
    async fn original_author(&self, pr_number: u64) -> Result<Option<String>>;
}

/// Link settings for rendered entries.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct RenderOptions {
    /// Repository web URL, e.g. `https://github.com/owner/repo`.
    pub repo_url: String,
    /// Base URL for author profiles.
    #[builder(default = "DEFAULT_PROFILE_URL.to_string()")]
    pub profile_url: String,
}

/// Renders release notes for one version.
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render `body` to Markdown. Bot authored entries are resolved through
    /// `lookup`; a failed lookup only drops that entry's author link.
    pub async fn render(
        &self,
        body: &ChangelogBody,
        lookup: &dyn AuthorLookup,
    ) -> Result<String> {
        let mut output = format!("# {}", strip_v(&body.version));

        if let Some(date) = body.release_date.as_deref()
            && !date.is_empty()
        {
            output.push_str(&format!(" ({date})"));
        }

        output.push_str("\n\n");

        self.write_pr_section(&mut output, FEATURES_TITLE, &body.features, lookup)
            .await;
        self.write_pr_section(&mut output, BUGFIXES_TITLE, &body.bugfixes, lookup)
            .await;
        write_notice_section(&mut output, BREAKING_TITLE, &body.breaking_changes);
        write_notice_section(
            &mut output,
            DEPRECATIONS_TITLE,
            &body.deprecation_changes,
        );
        self.write_pr_section(
            &mut output,
            PLUGIN_DEV_TITLE,
            &body.plugin_dev_changes,
            lookup,
        )
        .await;

        Ok(output)
    }

    async fn write_pr_section(
        &self,
        output: &mut String,
        title: &str,
        prs: &[PullRequestInfo],
        lookup: &dyn AuthorLookup,
    ) {
        if prs.is_empty() {
            return;
        }

        output.push_str(&format!("### {title}\n\n"));

        for pr in prs {
            let line = self.render_entry(pr, lookup).await;
            output.push_str(&line);
        }

        output.push('\n');
    }

    async fn render_entry(
        &self,
        pr: &PullRequestInfo,
        lookup: &dyn AuthorLookup,
    ) -> String {
        let title = format_title(&pr.title);

        if pr.is_enterprise() {
            return format!("- {title}. (Enterprise)\n");
        }

        let mut line = format!(
            "- {title}. [#{number}]({repo}/issues/{number})",
            number = pr.number,
            repo = self.options.repo_url,
        );

        if let Some(author) = self.resolve_author(pr, lookup).await {
            line.push_str(&format!(
                ", [@{author}]({}/{author})",
                self.options.profile_url
            ));
        }

        line.push('\n');
        line
    }

    async fn resolve_author(
        &self,
        pr: &PullRequestInfo,
        lookup: &dyn AuthorLookup,
    ) -> Option<String> {
        if !pr.author_is_bot {
            return pr.author.clone().filter(|a| !a.is_empty());
        }

        let Some(original) = pr.head_ref.as_deref().and_then(parse_backport_branch)
        else {
            debug!(
                "#{} was opened by a bot from a non-backport branch: omitting author",
                pr.number
            );
            return None;
        };

        match lookup.original_author(original).await {
            Ok(Some(author)) if !author.is_empty() => {
                debug!("#{} is a backport of #{original} by {author}", pr.number);
                Some(author)
            }
            Ok(_) => {
                warn!("no author found for #{original}: omitting author of #{}", pr.number);
                None
            }
            Err(err) => {
                warn!(
                    "failed to resolve author of #{original} for #{}: {err}",
                    pr.number
                );
                None
            }
        }
    }
}

fn write_notice_section(output: &mut String, title: &str, notices: &[String]) {
    if notices.is_empty() {
        return;
    }

    output.push_str(&format!("### {title}\n\n"));

    for notice in notices {
        output.push_str(notice);
        output.push_str("\n\n");
    }
}

/// Normalizes a pull request title for a changelog line, without the
/// closing period.
pub fn format_title(title: &str) -> String {
    let stripped = STREAM_PREFIX_REGEX.replace(title.trim(), "");
    let stripped = stripped.trim();
    let stripped = stripped.strip_suffix('.').unwrap_or(stripped).trim_end();

    if let Some((category, rest)) = stripped.split_once(':')
        && !category.trim().is_empty()
        && !rest.starts_with("//")
        && !inside_angle_brackets(category)
    {
        return format!(
            "**{}:**{}",
            escape_html(category.trim()),
            escape_html(rest)
        );
    }

    escape_html(stripped)
}

/// Whether text ending here leaves a `<` unclosed.
fn inside_angle_brackets(text: &str) -> bool {
    text.matches('<').count() > text.matches('>').count()
}

fn escape_html(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
#[path = "./render_tests.rs"]
mod tests;
