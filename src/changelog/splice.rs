//! Splices a rendered version block into an existing changelog file.
//!
//! A changelog holds one block per version, delimited by
//! `<!-- {version} START -->` and `<!-- {version} END -->` lines, newest
//! version first. Splicing a version either replaces its existing block in
//! place or inserts a new block next to its nearest neighbour so the
//! descending order is kept. Lines outside the target block are copied
//! through byte for byte.
use log::*;
use regex::Regex;
use semver::Version;
use std::{
    fs,
    io::ErrorKind,
    ops::RangeInclusive,
    path::Path,
    sync::LazyLock,
};

use crate::{
    changelog::version::{ordering_key, parse_version, strip_v},
    result::Result,
};

/// Matches a block marker line, capturing its version and kind.
static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<!-- (?<version>\S+) (?<kind>START|END) -->$").unwrap()
});

/// Start marker line for a version, without line terminator.
pub fn start_marker(version: &str) -> String {
    format!("<!-- {version} START -->")
}

/// End marker line for a version, without line terminator.
pub fn end_marker(version: &str) -> String {
    format!("<!-- {version} END -->")
}

/// Full block text written into the changelog for a version.
pub fn block_for(version: &str, rendered: &str) -> String {
    let mut block = format!("{}\n\n{rendered}", start_marker(version));
    if !block.ends_with('\n') {
        block.push('\n');
    }
    block.push_str(&end_marker(version));
    block.push('\n');
    block
}

#[derive(Debug, PartialEq, Eq)]
enum MarkerKind {
    Start,
    End,
}

#[derive(Debug)]
struct Marker<'a> {
    version: &'a str,
    kind: MarkerKind,
}

fn parse_marker(line: &str) -> Option<Marker<'_>> {
    let caps = MARKER_REGEX.captures(line.trim_end())?;
    let version = caps.name("version")?.as_str();
    let kind = match caps.name("kind")?.as_str() {
        "START" => MarkerKind::Start,
        _ => MarkerKind::End,
    };
    Some(Marker { version, kind })
}

/// Where the new block goes.
#[derive(Debug, PartialEq, Eq)]
enum Position {
    /// Replace the existing block(s), writing at the first one.
    Replace(usize),
    /// Right after the end marker of the nearest newer version.
    After(usize),
    /// Right before the start marker of the first older version.
    Before(usize),
    Append,
}

/// Result of the first pass over the file.
#[derive(Debug, Default)]
struct Scan {
    /// Line ranges of existing blocks for the target version.
    replace: Vec<RangeInclusive<usize>>,
    /// End marker of the nearest version >= target, and its ordering key.
    insert_after: Option<(usize, (u64, u64, u64))>,
    /// Start marker of the first version < target.
    insert_before: Option<usize>,
}

impl Scan {
    fn run(lines: &[&str], version: &str, target: Option<&Version>) -> Self {
        let mut scan = Scan::default();
        let mut open_start: Option<usize> = None;

        for (idx, line) in lines.iter().enumerate() {
            let Some(marker) = parse_marker(line) else {
                continue;
            };

            if marker.version == version {
                match marker.kind {
                    MarkerKind::Start => {
                        if let Some(orphan) = open_start.replace(idx) {
                            warn!(
                                "start marker for {version} on line {} has no end marker",
                                orphan + 1
                            );
                            scan.replace.push(orphan..=orphan);
                        }
                    }
                    MarkerKind::End => match open_start.take() {
                        Some(start) => scan.replace.push(start..=idx),
                        None => {
                            warn!(
                                "dropping end marker for {version} on line {} without start marker",
                                idx + 1
                            );
                            scan.replace.push(idx..=idx);
                        }
                    },
                }
                continue;
            }

            let (Some(target), Ok(other)) = (target, parse_version(marker.version))
            else {
                continue;
            };

            let key = ordering_key(&other);
            let target_key = ordering_key(target);

            match marker.kind {
                MarkerKind::End if key >= target_key => {
                    let nearer = scan
                        .insert_after
                        .map(|(_, best)| key <= best)
                        .unwrap_or(true);
                    if nearer {
                        scan.insert_after = Some((idx, key));
                    }
                }
                MarkerKind::Start if key < target_key => {
                    if scan.insert_before.is_none() {
                        scan.insert_before = Some(idx);
                    }
                }
                _ => {}
            }
        }

        if let Some(orphan) = open_start {
            warn!(
                "start marker for {version} on line {} has no end marker",
                orphan + 1
            );
            scan.replace.push(orphan..=orphan);
        }

        scan.replace.sort_by_key(|r| *r.start());

        scan
    }

    fn position(&self) -> Position {
        if let Some(first) = self.replace.first() {
            return Position::Replace(*first.start());
        }
        if let Some((idx, _)) = self.insert_after {
            return Position::After(idx);
        }
        if let Some(idx) = self.insert_before {
            return Position::Before(idx);
        }
        Position::Append
    }

    fn is_replaced(&self, idx: usize) -> bool {
        self.replace.iter().any(|r| r.contains(&idx))
    }
}

/// Returns `existing` with the block for `version` replaced by, or inserted
/// as, `rendered`.
pub fn splice(existing: &str, rendered: &str, version: &str) -> String {
    let version = strip_v(version.trim());
    let target = parse_version(version).ok();

    if target.is_none() {
        warn!("{version} is not a semantic version: block order is not checked");
    }

    let lines: Vec<&str> = existing.split_inclusive('\n').collect();
    let scan = Scan::run(&lines, version, target.as_ref());
    let position = scan.position();

    debug!("splicing block for {version}: {position:?}");

    let block = block_for(version, rendered);
    let mut output = String::with_capacity(existing.len() + block.len());
    let mut written = false;

    for (idx, line) in lines.iter().enumerate() {
        if scan.is_replaced(idx) {
            if position == Position::Replace(idx) {
                output.push_str(&block);
                written = true;
            }
            continue;
        }

        if position == Position::Before(idx) {
            output.push_str(&block);
            written = true;
        }

        output.push_str(line);

        if position == Position::After(idx) {
            if !line.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&block);
            written = true;
        }
    }

    if !written {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&block);
    }

    output
}

/// Splices `rendered` into the changelog at `path`, creating the file if it
/// does not exist yet.
pub fn update_file(
    path: impl AsRef<Path>,
    rendered: &str,
    version: &str,
) -> Result<()> {
    let path = path.as_ref();

    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!("no changelog found at {}: creating it", path.display());
            String::new()
        }
        Err(err) => return Err(err.into()),
    };

    let updated = splice(&existing, rendered, version);

    fs::write(path, updated)?;

    info!("updated {} for version {}", path.display(), strip_v(version));

    Ok(())
}

#[cfg(test)]
#[path = "./splice_tests.rs"]
mod tests;
