use tempfile::TempDir;

use crate::changelog::extract::{ExtractOptions, extract_content_for_version};

use super::*;

const TWO_BLOCKS: &str = r#"<!-- 9.5.0 START -->

# 9.5.0 (2023-04-04)

### Features and enhancements

- **Alerting:** Something new. [#10](https://github.com/o/r/issues/10)

<!-- 9.5.0 END -->
<!-- 9.4.0 START -->

# 9.4.0 (2023-02-28)

### Bug fixes

- Fixed it. [#9](https://github.com/o/r/issues/9)

<!-- 9.4.0 END -->
"#;

const WITH_EXISTING: &str = r#"<!-- 9.4.4 START -->

# 9.4.4 (2023-03-02)

### Bug fixes

- Old content. [#3](u)

<!-- 9.4.4 END -->
<!-- 9.4.1 START -->

# 9.4.1

<!-- 9.4.1 END -->
<!-- 9.4.0 START -->

# 9.4.0

<!-- 9.4.0 END -->
"#;

const RENDERED: &str = "# 9.4.4 (2023-03-02)\n\n### Bug fixes\n\n- New content. [#4](u)\n\n";

fn count_lines(content: &str, line: &str) -> usize {
    content.lines().filter(|l| *l == line).count()
}

fn fixtures() -> Vec<&'static str> {
    vec![
        "",
        "no markers here\n",
        "no trailing newline",
        TWO_BLOCKS,
        WITH_EXISTING,
        "<!-- 9.4.0 START -->\n<!-- 9.4.0 END -->\n<!-- 9.6.0 START -->\n<!-- 9.6.0 END -->\n<!-- 9.5.0 START -->\n<!-- 9.5.0 END -->\n",
    ]
}

#[test]
fn empty_file_gets_single_block() {
    let output = splice("", "# 9.4.4\n\n", "9.4.4");
    assert_eq!(
        output,
        "<!-- 9.4.4 START -->\n\n# 9.4.4\n\n<!-- 9.4.4 END -->\n"
    );
}

#[test]
fn leading_v_is_stripped_from_markers() {
    let output = splice("", "# 9.4.4\n\n", "v9.4.4");
    assert!(output.starts_with("<!-- 9.4.4 START -->\n"));
    assert!(!output.contains("v9.4.4"));
}

#[test]
fn inserts_between_newer_and_older_versions() {
    let output = splice(TWO_BLOCKS, RENDERED, "9.4.4");

    let newer_end = output.find("<!-- 9.5.0 END -->").unwrap();
    let start = output.find("<!-- 9.4.4 START -->").unwrap();
    let end = output.find("<!-- 9.4.4 END -->").unwrap();
    let older_start = output.find("<!-- 9.4.0 START -->").unwrap();

    assert!(newer_end < start);
    assert!(start < end);
    assert!(end < older_start);

    let expected = TWO_BLOCKS.replace(
        "<!-- 9.5.0 END -->\n",
        &format!("<!-- 9.5.0 END -->\n{}", block_for("9.4.4", RENDERED)),
    );
    assert_eq!(output, expected);
}

#[test]
fn newest_version_goes_before_older_blocks() {
    let content = format!("# Changelog\n\n{TWO_BLOCKS}");
    let output = splice(&content, "# 10.0.0\n\n", "10.0.0");

    assert!(output.starts_with("# Changelog\n\n<!-- 10.0.0 START -->"));
    assert!(output.ends_with(TWO_BLOCKS));
}

#[test]
fn oldest_version_goes_after_the_last_block() {
    let output = splice(TWO_BLOCKS, "# 9.3.0\n\n", "9.3.0");

    assert!(output.starts_with(TWO_BLOCKS));
    assert!(output.ends_with("<!-- 9.3.0 END -->\n"));
}

#[test]
fn replaces_existing_block_in_place() {
    let output = splice(WITH_EXISTING, RENDERED, "9.4.4");

    assert!(output.contains("New content."));
    assert!(!output.contains("Old content."));

    let tail_start = WITH_EXISTING.find("<!-- 9.4.1 START -->").unwrap();
    let tail = &WITH_EXISTING[tail_start..];
    assert!(output.ends_with(tail));
    assert!(output.starts_with("<!-- 9.4.4 START -->\n\n# 9.4.4 (2023-03-02)"));
}

#[test]
fn splice_is_idempotent() {
    for fixture in fixtures() {
        let once = splice(fixture, RENDERED, "9.4.4");
        let twice = splice(&once, RENDERED, "9.4.4");
        assert_eq!(once, twice, "fixture: {fixture:?}");
    }
}

#[test]
fn output_has_exactly_one_block_for_version() {
    for fixture in fixtures() {
        let output = splice(fixture, RENDERED, "9.4.4");
        assert_eq!(count_lines(&output, "<!-- 9.4.4 START -->"), 1);
        assert_eq!(count_lines(&output, "<!-- 9.4.4 END -->"), 1);
    }
}

#[test]
fn other_blocks_are_preserved_in_order() {
    for fixture in fixtures() {
        let output = splice(fixture, RENDERED, "9.4.4");
        let without_new = output.replace(&block_for("9.4.4", RENDERED), "");

        if !fixture.contains("9.4.4") {
            let mut original = fixture.to_string();
            if !original.is_empty() && !original.ends_with('\n') {
                original.push('\n');
            }
            assert_eq!(without_new, original, "fixture: {fixture:?}");
        }
    }
}

#[test]
fn duplicate_blocks_collapse_into_one() {
    let content = "<!-- 1.0.0 START -->\nold a\n<!-- 1.0.0 END -->\nmiddle\n<!-- 1.0.0 START -->\nold b\n<!-- 1.0.0 END -->\n";
    let output = splice(content, "# 1.0.0\n\n", "1.0.0");

    assert_eq!(
        output,
        "<!-- 1.0.0 START -->\n\n# 1.0.0\n\n<!-- 1.0.0 END -->\nmiddle\n"
    );
}

#[test]
fn orphan_start_marker_is_replaced_alone() {
    let content = "<!-- 1.0.0 START -->\nleft over\n";
    let once = splice(content, "# 1.0.0\n\n", "1.0.0");

    assert_eq!(
        once,
        "<!-- 1.0.0 START -->\n\n# 1.0.0\n\n<!-- 1.0.0 END -->\nleft over\n"
    );
    assert_eq!(splice(&once, "# 1.0.0\n\n", "1.0.0"), once);
}

#[test]
fn malformed_markers_are_plain_content() {
    let content = "<!-- 9.5.0 START-->\n<!--9.5.0 END -->\n";
    let output = splice(content, "# 9.4.4\n\n", "9.4.4");

    assert!(output.starts_with(content));
}

#[test]
fn rendered_without_trailing_newline_keeps_markers_on_own_line() {
    let output = splice("", "# 1.0.0", "1.0.0");
    assert_eq!(
        output,
        "<!-- 1.0.0 START -->\n\n# 1.0.0\n<!-- 1.0.0 END -->\n"
    );
}

#[test]
fn extract_round_trips_spliced_content() {
    for fixture in fixtures() {
        let output = splice(fixture, RENDERED, "9.4.4");
        let extracted = extract_content_for_version(
            &output,
            "9.4.4",
            ExtractOptions::default(),
        )
        .unwrap();
        assert_eq!(extracted, RENDERED.trim());

        let without_heading = extract_content_for_version(
            &output,
            "9.4.4",
            ExtractOptions {
                remove_heading: true,
            },
        )
        .unwrap();
        assert_eq!(without_heading, "### Bug fixes\n\n- New content. [#4](u)");
    }
}

#[test]
fn update_file_creates_and_updates() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("CHANGELOG.md");

    update_file(&path, "# 9.4.4\n\n", "9.4.4").unwrap();
    let created = fs::read_to_string(&path).unwrap();
    assert_eq!(
        created,
        "<!-- 9.4.4 START -->\n\n# 9.4.4\n\n<!-- 9.4.4 END -->\n"
    );

    update_file(&path, "# 9.5.0\n\n", "9.5.0").unwrap();
    let updated = fs::read_to_string(&path).unwrap();
    assert!(updated.starts_with("<!-- 9.5.0 START -->"));
    assert!(updated.ends_with(&created));
}

#[test]
fn update_file_propagates_io_errors() {
    let tmp_dir = TempDir::new().unwrap();
    // a directory can't be read as a file
    let result = update_file(tmp_dir.path(), "# 1.0.0\n\n", "1.0.0");
    assert!(result.is_err());
}
