//! Parses rendered changelog Markdown back into sections and entries.
//!
//! Entry titles are only reliable for lines following the
//! `description. [#N](...), [@user](...)` convention: everything from the
//! first link onwards is dropped, so free-form entries may come back
//! truncated.
use log::*;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use std::io::Read;

use crate::{
    changelog::types::{Entry, Section},
    error::ActionsError,
    result::Result,
};

/// Title text being collected for the first block of a list item.
#[derive(Default)]
struct EntryCapture {
    text: String,
    done: bool,
    /// Number of the item's first `#N` link.
    issue: Option<u64>,
    /// Text of the link currently open in the item, if any.
    link: Option<String>,
}

impl EntryCapture {
    fn push(&mut self, text: &str) {
        if !self.done {
            self.text.push_str(text);
        }
    }
}

/// Parse changelog Markdown into level-3 sections of entries.
pub fn parse_sections(content: &str) -> Vec<Section> {
    walk(content).into_iter().map(|(section, _)| section).collect()
}

/// Same as [`parse_sections`], but every entry also carries the number of
/// the first `[#N](...)` link of its own list item.
pub fn parse_sections_with_issues(content: &str) -> Vec<Section> {
    walk(content)
        .into_iter()
        .map(|(mut section, issues)| {
            for (entry, issue) in section.entries.iter_mut().zip(issues) {
                entry.issue = issue;
            }
            section
        })
        .collect()
}

/// Sections paired with the issue link number of each of their entries.
fn walk(content: &str) -> Vec<(Section, Vec<Option<u64>>)> {
    let mut sections = vec![];
    let mut current: Option<(Section, Vec<Option<u64>>)> = None;
    let mut heading: Option<String> = None;
    let mut entry: Option<EntryCapture> = None;
    let mut list_depth = 0usize;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H3,
                ..
            }) if entry.is_none() => {
                heading = Some(String::new());
            }
            Event::End(TagEnd::Heading(HeadingLevel::H3)) => {
                if let Some(title) = heading.take() {
                    if let Some(done) = current.take() {
                        sections.push(done);
                    }
                    debug!("found changelog section: {}", title.trim());
                    current = Some((
                        Section {
                            title: title.trim().to_string(),
                            entries: vec![],
                        },
                        vec![],
                    ));
                }
            }
            Event::Start(Tag::List(_)) => {
                if let Some(capture) = entry.as_mut() {
                    // nested lists are not part of the entry title
                    capture.done = true;
                }
                list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
            }
            Event::Start(Tag::Item) if list_depth == 1 && current.is_some() => {
                entry = Some(EntryCapture::default());
            }
            Event::End(TagEnd::Item) if list_depth == 1 => {
                if let (Some(capture), Some((section, issues))) =
                    (entry.take(), current.as_mut())
                {
                    section.entries.push(Entry::new(capture.text.trim()));
                    issues.push(capture.issue);
                }
            }
            Event::Start(Tag::Link { .. }) => {
                if let Some(capture) = entry.as_mut() {
                    capture.done = true;
                    if list_depth == 1 {
                        capture.link = Some(String::new());
                    }
                }
            }
            Event::End(TagEnd::Link) => {
                if let Some(capture) = entry.as_mut()
                    && let Some(text) = capture.link.take()
                    && capture.issue.is_none()
                {
                    capture.issue = parse_issue_link(&text);
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if let Some(capture) = entry.as_mut() {
                    capture.done = true;
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(title) = heading.as_mut() {
                    title.push_str(&text);
                } else if let Some(capture) = entry.as_mut() {
                    if let Some(link) = capture.link.as_mut() {
                        link.push_str(&text);
                    }
                    capture.push(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(title) = heading.as_mut() {
                    title.push(' ');
                } else if let Some(capture) = entry.as_mut() {
                    capture.push(" ");
                }
            }
            _ => {}
        }
    }

    if let Some(done) = current.take() {
        sections.push(done);
    }

    sections
}

/// Issue number of a link whose text is `#N`.
fn parse_issue_link(text: &str) -> Option<u64> {
    text.trim().strip_prefix('#')?.parse().ok()
}

/// Read all Markdown from `reader` and parse it into sections.
pub fn parse_sections_from_reader(mut reader: impl Read) -> Result<Vec<Section>> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|err| ActionsError::parse(err.to_string()))?;
    Ok(parse_sections(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_sections() {
        assert!(parse_sections("").is_empty());
    }

    #[test]
    fn parses_category_entry_without_links() {
        let content = "### Bug fixes\n\n- **Category:** some title. [#123](https://github.com/o/r/issues/123), [@user](https://github.com/user)\n";
        let sections = parse_sections(content);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Bug fixes");
        assert_eq!(sections[0].entries.len(), 1);
        assert_eq!(sections[0].entries[0].title, "Category: some title.");
        assert_eq!(sections[0].entries[0].issue, None);
        assert_eq!(sections[0].entries[0].version, None);
    }

    #[test]
    fn ignores_content_before_first_section() {
        let content = "# 9.4.4 (2023-03-02)\n\n- stray item\n\n### Features and enhancements\n\n- **Alerting:** Add a thing. [#1](u)\n- Plain title. [#2](u), [@a](p)\n";
        let sections = parse_sections(content);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Features and enhancements");
        let titles: Vec<&str> =
            sections[0].entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Alerting: Add a thing.", "Plain title."]);
    }

    #[test]
    fn splits_multiple_sections_in_order() {
        let content = r#"### Features and enhancements

- Feature one. [#1](u)

### Bug fixes

- Fix one. [#2](u)
- Fix two. [#3](u)

### Plugin development fixes & changes

- Toolkit change. [#4](u)
"#;
        let sections = parse_sections(content);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].entries.len(), 1);
        assert_eq!(sections[1].title, "Bug fixes");
        assert_eq!(sections[1].entries.len(), 2);
        assert_eq!(sections[2].title, "Plugin development fixes & changes");
        assert_eq!(sections[2].entries[0].title, "Toolkit change.");
    }

    #[test]
    fn nested_lists_are_not_entries() {
        let content = "### Bug fixes\n\n- Outer. [#1](u)\n  - inner item\n- Second.\n";
        let sections = parse_sections(content);

        let titles: Vec<&str> =
            sections[0].entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Outer.", "Second."]);
    }

    #[test]
    fn free_form_sections_keep_their_title() {
        let content = "### Breaking changes\n\nSome paragraph about a change. Issue [#5](u)\n\n### Deprecations\n\n";
        let sections = parse_sections(content);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Breaking changes");
        assert!(sections[0].entries.is_empty());
        assert_eq!(sections[1].title, "Deprecations");
    }

    #[test]
    fn text_after_link_is_dropped() {
        let content = "### Bug fixes\n\n- Fix [this](u) properly.\n";
        let sections = parse_sections(content);

        assert_eq!(sections[0].entries[0].title, "Fix");
    }

    #[test]
    fn reader_variant_matches_str_variant() {
        let content = "### Bug fixes\n\n- One. [#1](u)\n";
        let from_reader =
            parse_sections_from_reader(content.as_bytes()).unwrap();
        assert_eq!(from_reader, parse_sections(content));
    }

    #[test]
    fn issues_are_taken_from_each_item() {
        let content = "### Bug fixes\n\n- Fix crash. [#1](u), [@a](p)\n- Other. [docs](d) [#2](u)\n- No link.\n- Nested.\n  - inner [#9](u)\n";

        let issues: Vec<Option<u64>> = parse_sections_with_issues(content)[0]
            .entries
            .iter()
            .map(|e| e.issue)
            .collect();

        assert_eq!(issues, vec![Some(1), Some(2), None, None]);
        assert!(parse_sections(content)[0].entries.iter().all(|e| e.issue.is_none()));
    }
}
