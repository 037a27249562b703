//! Common functionality shared between commands
use log::*;
use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use crate::{
    changelog::{
        classify::{ClassifyOptions, ClassifyOptionsBuilder},
        render::{RenderOptions, RenderOptionsBuilder},
    },
    forge::config::RemoteConfig,
    result::Result,
};

/// Link settings for rendered entries of `remote`.
pub fn render_options(remote: &RemoteConfig) -> Result<RenderOptions> {
    let options = RenderOptionsBuilder::default()
        .repo_url(remote.repo_link_base_url.clone())
        .profile_url(remote.profile_link_base_url.clone())
        .build()?;
    Ok(options)
}

/// Classification settings for `remote`.
pub fn classify_options(
    remote: &RemoteConfig,
    include_all: bool,
) -> Result<ClassifyOptions> {
    let options = ClassifyOptionsBuilder::default()
        .include_all(include_all)
        .repo_url(remote.repo_link_base_url.clone())
        .build()?;
    Ok(options)
}

/// Writes `content` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)?;
            info!("wrote output to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }

    Ok(())
}
