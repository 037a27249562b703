//! CSV export of historical changelog entries.
use log::*;
use serde::Serialize;
use std::io::Write;

use crate::{
    changelog::{
        extract::{ExtractOptions, extract_content_for_version, list_versions},
        render::{BUGFIXES_TITLE, FEATURES_TITLE, PLUGIN_DEV_TITLE},
        sections::parse_sections_with_issues,
        version::strip_v,
    },
    error::ActionsError,
    result::Result,
};

/// Sections whose entries follow the one-line-per-change convention.
pub const EXPORTED_SECTIONS: &[&str] =
    &[FEATURES_TITLE, BUGFIXES_TITLE, PLUGIN_DEV_TITLE];

#[derive(Debug, Serialize)]
struct Row<'a> {
    version: &'a str,
    section: &'a str,
    title: &'a str,
    issue: Option<u64>,
}

/// Writes one CSV row per entry of the exported sections of `versions`
/// (every version in the file when empty). Returns the number of rows.
pub fn export_csv(
    content: &str,
    versions: &[String],
    writer: impl Write,
) -> Result<usize> {
    let versions = if versions.is_empty() {
        list_versions(content)
    } else {
        versions.iter().map(|v| strip_v(v).to_string()).collect()
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for version in versions {
        let Some(block) = extract_content_for_version(
            content,
            &version,
            ExtractOptions {
                remove_heading: true,
            },
        ) else {
            warn!("no changelog block found for {version}: skipping");
            continue;
        };

        for section in parse_sections_with_issues(&block) {
            if !EXPORTED_SECTIONS.contains(&section.title.as_str()) {
                continue;
            }

            for entry in section.entries {
                csv_writer
                    .serialize(Row {
                        version: &version,
                        section: &section.title,
                        title: &entry.title,
                        issue: entry.issue,
                    })
                    .map_err(ActionsError::from)?;
                rows += 1;
            }
        }
    }

    csv_writer.flush()?;

    info!("exported {rows} changelog entries");

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANGELOG: &str = r#"<!-- 9.5.0 START -->

# 9.5.0 (2023-04-04)

### Features and enhancements

- **Alerting:** Something new. [#10](https://github.com/o/r/issues/10), [@a](https://github.com/a)

### Breaking changes

Removed a thing. Issue [#11](u)

<!-- 9.5.0 END -->
<!-- 9.4.4 START -->

# 9.4.4 (2023-03-02)

### Bug fixes

- Fixed it. [#9](https://github.com/o/r/issues/9)
- Enterprise only. (Enterprise)

<!-- 9.4.4 END -->
"#;

    #[test]
    fn exports_all_versions_by_default() {
        let mut output = vec![];
        let rows = export_csv(CHANGELOG, &[], &mut output).unwrap();

        assert_eq!(rows, 3);
        let csv = String::from_utf8(output).unwrap();
        assert_eq!(
            csv,
            "version,section,title,issue\n\
             9.5.0,Features and enhancements,Alerting: Something new.,10\n\
             9.4.4,Bug fixes,Fixed it.,9\n\
             9.4.4,Bug fixes,Enterprise only. (Enterprise),\n"
        );
    }

    #[test]
    fn exports_selected_versions_only() {
        let mut output = vec![];
        let rows =
            export_csv(CHANGELOG, &["v9.4.4".to_string()], &mut output).unwrap();

        assert_eq!(rows, 2);
        let csv = String::from_utf8(output).unwrap();
        assert!(!csv.contains("9.5.0"));
    }

    #[test]
    fn unknown_versions_are_skipped() {
        let mut output = vec![];
        let rows =
            export_csv(CHANGELOG, &["1.0.0".to_string()], &mut output).unwrap();
        assert_eq!(rows, 0);
    }

    #[test]
    fn issue_comes_from_the_entry_own_line() {
        let content = "<!-- 9.4.4 START -->\n\n# 9.4.4\n\n### Bug fixes\n\n- **Alerting:** Fix crash. [#1](u)\n- Fix crash. [#2](u)\n\n<!-- 9.4.4 END -->\n";
        let mut output = vec![];

        export_csv(content, &[], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "version,section,title,issue\n\
             9.4.4,Bug fixes,Alerting: Fix crash.,1\n\
             9.4.4,Bug fixes,Fix crash.,2\n"
        );
    }

    #[test]
    fn escaped_titles_keep_their_issue() {
        let content = "<!-- 9.4.4 START -->\n\n### Features and enhancements\n\n- Use &lt;Select&gt; component. [#7](u)\n\n<!-- 9.4.4 END -->\n";
        let mut output = vec![];

        export_csv(content, &[], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "version,section,title,issue\n\
             9.4.4,Features and enhancements,Use <Select> component.,7\n"
        );
    }
}
