//! Extraction of a single version's block from a changelog file.
use log::*;
use regex::Regex;
use std::{io::BufRead, sync::LazyLock};

use crate::{
    changelog::{
        splice::{end_marker, start_marker},
        version::strip_v,
    },
    result::Result,
};

/// Matches a block start marker and captures its version.
static START_MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<!-- (?<version>\S+) START -->$").unwrap()
});

/// Options for [`extract_content_for_version`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Drop the generated `# {version} (date)` title line.
    pub remove_heading: bool,
}

/// Accumulates the lines of a version block.
struct BlockCollector {
    start: String,
    end: String,
    options: ExtractOptions,
    in_block: bool,
    found: bool,
    emitted_text: bool,
    lines: Vec<String>,
}

impl BlockCollector {
    fn new(version: &str, options: ExtractOptions) -> Self {
        let version = strip_v(version.trim());
        Self {
            start: start_marker(version),
            end: end_marker(version),
            options,
            in_block: false,
            found: false,
            emitted_text: false,
            lines: vec![],
        }
    }

    /// Feed one line. Returns false once the end marker has been seen.
    fn push(&mut self, line: &str) -> bool {
        let trimmed = line.trim_end();

        if !self.in_block {
            if trimmed == self.start {
                self.in_block = true;
                self.found = true;
            }
            return true;
        }

        if trimmed == self.end {
            self.in_block = false;
            return false;
        }

        let blank = trimmed.trim().is_empty();

        if !blank && !self.emitted_text {
            self.emitted_text = true;
            if self.options.remove_heading && trimmed.starts_with("# ") {
                debug!("removing heading from extracted block: {trimmed}");
                return true;
            }
        }

        self.lines.push(line.trim_end_matches(['\n', '\r']).to_string());
        true
    }

    fn finish(self) -> Option<String> {
        if !self.found {
            return None;
        }

        if self.in_block {
            warn!(
                "no end marker found for block starting with {}: using remaining content",
                self.start
            );
        }

        Some(self.lines.join("\n").trim().to_string())
    }
}

/// Returns the content of the block for `version`, or `None` when the file
/// has no such block.
pub fn extract_content_for_version(
    content: &str,
    version: &str,
    options: ExtractOptions,
) -> Option<String> {
    let mut collector = BlockCollector::new(version, options);

    for line in content.lines() {
        if !collector.push(line) {
            break;
        }
    }

    collector.finish()
}

/// Same as [`extract_content_for_version`] but reads lines from `reader`,
/// stopping as soon as the block has been read.
pub fn extract_from_reader(
    reader: impl BufRead,
    version: &str,
    options: ExtractOptions,
) -> Result<Option<String>> {
    let mut collector = BlockCollector::new(version, options);

    for line in reader.lines() {
        if !collector.push(&line?) {
            break;
        }
    }

    Ok(collector.finish())
}

/// Lists the versions of every block in file order, without duplicates.
pub fn list_versions(content: &str) -> Vec<String> {
    let mut versions: Vec<String> = vec![];

    for line in content.lines() {
        if let Some(caps) = START_MARKER_REGEX.captures(line.trim_end()) {
            let version = caps["version"].to_string();
            if !versions.contains(&version) {
                versions.push(version);
            }
        }
    }

    versions
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANGELOG: &str = r#"<!-- 9.5.0 START -->

# 9.5.0 (2023-04-04)

### Features and enhancements

- New feature. [#10](u)

<!-- 9.5.0 END -->
<!-- 9.4.4 START -->

# 9.4.4 (2023-03-02)

### Bug fixes

- Fixed it. [#9](u)

<!-- 9.4.4 END -->
"#;

    #[test]
    fn extracts_block_content_trimmed() {
        let content = extract_content_for_version(
            CHANGELOG,
            "9.4.4",
            ExtractOptions::default(),
        )
        .unwrap();

        assert_eq!(
            content,
            "# 9.4.4 (2023-03-02)\n\n### Bug fixes\n\n- Fixed it. [#9](u)"
        );
    }

    #[test]
    fn accepts_leading_v() {
        let content = extract_content_for_version(
            CHANGELOG,
            "v9.5.0",
            ExtractOptions::default(),
        );
        assert!(content.unwrap().starts_with("# 9.5.0"));
    }

    #[test]
    fn missing_version_is_not_found() {
        let content = extract_content_for_version(
            CHANGELOG,
            "9.4.3",
            ExtractOptions::default(),
        );
        assert!(content.is_none());
        assert!(
            extract_content_for_version("", "9.4.3", ExtractOptions::default())
                .is_none()
        );
    }

    #[test]
    fn removes_only_the_first_heading() {
        let content = "<!-- 1.0.0 START -->\n\n# 1.0.0\n\n# Not removed\n\ntext\n<!-- 1.0.0 END -->\n";
        let extracted = extract_content_for_version(
            content,
            "1.0.0",
            ExtractOptions {
                remove_heading: true,
            },
        )
        .unwrap();

        assert_eq!(extracted, "# Not removed\n\ntext");
    }

    #[test]
    fn keeps_first_line_when_it_is_not_a_heading() {
        let content =
            "<!-- 1.0.0 START -->\nintro\n# 1.0.0\n<!-- 1.0.0 END -->\n";
        let extracted = extract_content_for_version(
            content,
            "1.0.0",
            ExtractOptions {
                remove_heading: true,
            },
        )
        .unwrap();

        assert_eq!(extracted, "intro\n# 1.0.0");
    }

    #[test]
    fn heading_level_two_is_kept() {
        let content = "<!-- 1.0.0 START -->\n## 1.0.0\n<!-- 1.0.0 END -->\n";
        let extracted = extract_content_for_version(
            content,
            "1.0.0",
            ExtractOptions {
                remove_heading: true,
            },
        )
        .unwrap();

        assert_eq!(extracted, "## 1.0.0");
    }

    #[test]
    fn unterminated_block_runs_to_end() {
        let content = "<!-- 1.0.0 START -->\n# 1.0.0\n\nbody\n";
        let extracted = extract_content_for_version(
            content,
            "1.0.0",
            ExtractOptions::default(),
        )
        .unwrap();

        assert_eq!(extracted, "# 1.0.0\n\nbody");
    }

    #[test]
    fn reader_variant_stops_at_end_marker() {
        let extracted = extract_from_reader(
            CHANGELOG.as_bytes(),
            "9.5.0",
            ExtractOptions {
                remove_heading: true,
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            extracted,
            "### Features and enhancements\n\n- New feature. [#10](u)"
        );
    }

    #[test]
    fn lists_versions_in_file_order() {
        let mut content = CHANGELOG.to_string();
        content.push_str("<!-- 9.5.0 START -->\n<!-- 9.5.0 END -->\n");
        assert_eq!(list_versions(&content), vec!["9.5.0", "9.4.4"]);
    }
}
