//! CSV export of changelog entries.
use log::*;
use std::{
    fs::{self, File},
    io,
};

use crate::{
    changelog::export::export_csv, cli::ExportArgs, result::Result,
};

/// Execute export-csv command.
pub fn execute(cmd: &ExportArgs) -> Result<()> {
    let content = fs::read_to_string(&cmd.changelog_file)?;

    let rows = match &cmd.output {
        Some(path) => {
            let rows = export_csv(&content, &cmd.versions, File::create(path)?)?;
            info!("wrote {rows} rows to {}", path.display());
            rows
        }
        None => export_csv(&content, &cmd.versions, io::stdout().lock())?,
    };

    if rows == 0 {
        warn!(
            "no changelog entries exported from {}",
            cmd.changelog_file.display()
        );
    }

    Ok(())
}
