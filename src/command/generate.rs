//! Changelog generation from a milestone's merged pull requests.
use log::*;

use crate::{
    changelog::{
        classify::classify,
        render::Renderer,
        splice,
        version::{parse_version, strip_v},
    },
    cli::{self, GenerateArgs},
    command::common,
    forge::{manager::ForgeManager, request::MilestonePrsRequest},
    result::Result,
};

/// Execute generate command against the configured GitHub repository.
pub async fn execute(args: &cli::Args, cmd: &GenerateArgs) -> Result<()> {
    let remote = args.get_remote()?;
    let forge = remote.get_forge()?;
    run(&forge, cmd).await
}

/// Renders the entry for `cmd.version` and either prints it (dry run) or
/// splices it into the changelog file.
pub async fn run(forge: &ForgeManager, cmd: &GenerateArgs) -> Result<()> {
    let rendered = render_release_notes(forge, cmd).await?;

    if cmd.dry_run {
        warn!(
            "dry_run: would update {} with:",
            cmd.changelog_file.display()
        );
        return common::write_output(None, &rendered);
    }

    splice::update_file(&cmd.changelog_file, &rendered, &cmd.version)
}

/// Loads the milestone's pull requests and renders the changelog entry.
pub async fn render_release_notes(
    forge: &ForgeManager,
    cmd: &GenerateArgs,
) -> Result<String> {
    let version = strip_v(&cmd.version);
    parse_version(version)?;

    let title = cmd.milestone.as_deref().unwrap_or(version);
    let milestone = forge.load_milestone(None, title).await?;

    let mut prs = forge
        .get_milestone_pull_requests(MilestonePrsRequest {
            repo: None,
            milestone_number: milestone.number,
        })
        .await?;

    if let Some(repo) = cmd.enterprise_repo.as_deref() {
        let external = forge.load_external_pull_requests(repo, title).await?;
        info!("adding {} pull requests from {repo}", external.len());
        prs.extend(external.into_iter().map(|mut pr| {
            pr.from_enterprise = true;
            pr
        }));
    }

    let release_date = cmd
        .release_date
        .clone()
        .or_else(|| milestone.release_date());

    let remote = forge.remote_config();
    let options = common::classify_options(&remote, cmd.include_all)?;
    let body = classify(version, release_date, prs, &options);

    if body.is_empty() {
        warn!("no changelog entries found for milestone {title}");
    }

    let renderer = Renderer::new(common::render_options(&remote)?);

    renderer.render(&body, forge).await
}
