//! Sorts a milestone's merged pull requests into changelog groups.
use derive_builder::Builder;
use log::*;

use crate::changelog::{
    render::format_title,
    types::{ChangelogBody, PullRequestInfo},
    version::strip_v,
};

/// Only pull requests with this label end up in the changelog.
pub const CHANGELOG_LABEL: &str = "add to changelog";
pub const BREAKING_LABEL: &str = "breaking change";
pub const DEPRECATION_LABEL: &str = "deprecation";
pub const BUG_LABEL: &str = "type/bug";

/// Label prefixes of changes aimed at plugin developers.
pub const PLUGIN_DEV_LABEL_PREFIXES: &[&str] = &[
    "area/grafana/toolkit",
    "area/grafana/ui",
    "area/grafana/runtime",
    "area/grafana/data",
    "area/plugins-dev",
];

const BREAKING_NOTICE_HEADING: &str = "Release notice breaking change";
const DEPRECATION_NOTICE_HEADING: &str = "Deprecation notice";

/// Options for [`classify`].
#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into), default)]
pub struct ClassifyOptions {
    /// Include pull requests without the changelog label.
    pub include_all: bool,
    /// Repository web URL used for issue links in notices.
    pub repo_url: String,
}

/// Build the changelog body for `version` from merged pull requests.
pub fn classify(
    version: &str,
    release_date: Option<String>,
    mut prs: Vec<PullRequestInfo>,
    options: &ClassifyOptions,
) -> ChangelogBody {
    let mut body = ChangelogBody::new(strip_v(version));
    body.release_date = release_date.filter(|d| !d.is_empty());

    prs.sort_by_key(|pr| pr.number);

    for pr in prs {
        if !options.include_all && !pr.has_label(CHANGELOG_LABEL) {
            debug!("skipping #{}: missing '{CHANGELOG_LABEL}' label", pr.number);
            continue;
        }

        if pr.has_label(BREAKING_LABEL) {
            body.breaking_changes.push(notice_for(
                &pr,
                BREAKING_NOTICE_HEADING,
                &options.repo_url,
            ));
        }

        if pr.has_label(DEPRECATION_LABEL) {
            body.deprecation_changes.push(notice_for(
                &pr,
                DEPRECATION_NOTICE_HEADING,
                &options.repo_url,
            ));
        }

        if is_plugin_dev(&pr) {
            body.plugin_dev_changes.push(pr);
        } else if pr.has_label(BUG_LABEL) {
            body.bugfixes.push(pr);
        } else {
            body.features.push(pr);
        }
    }

    info!(
        "classified changelog for {}: {} features, {} bug fixes, {} plugin changes, {} breaking, {} deprecations",
        body.version,
        body.features.len(),
        body.bugfixes.len(),
        body.plugin_dev_changes.len(),
        body.breaking_changes.len(),
        body.deprecation_changes.len(),
    );

    body
}

fn is_plugin_dev(pr: &PullRequestInfo) -> bool {
    pr.labels.iter().any(|label| {
        PLUGIN_DEV_LABEL_PREFIXES
            .iter()
            .any(|prefix| label.to_lowercase().starts_with(prefix))
    })
}

fn notice_for(pr: &PullRequestInfo, heading: &str, repo_url: &str) -> String {
    let text = extract_notice(&pr.body, heading)
        .unwrap_or_else(|| format!("{}.", format_title(&pr.title)));

    if pr.is_enterprise() {
        return text;
    }

    format!("{text} Issue [#{n}]({repo_url}/issues/{n})", n = pr.number)
}

/// Text under a Markdown heading named `heading` (any level, case
/// insensitive) up to the next heading.
pub fn extract_notice(body: &str, heading: &str) -> Option<String> {
    let mut lines = body.lines();

    lines.by_ref().find(|line| {
        let line = line.trim();
        line.starts_with('#')
            && line.trim_start_matches('#').trim().eq_ignore_ascii_case(heading)
    })?;

    let notice = lines
        .take_while(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<&str>>()
        .join("\n");

    let notice = notice.trim();

    if notice.is_empty() {
        return None;
    }

    Some(notice.to_string())
}
