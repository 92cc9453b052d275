use std::path::Path;

use pulldown_cmark::{Event, Parser, Tag};

use crate::diagnostic::{Diagnostic, Rule};

/// Check that every `[text](references/...)` and `[text](examples/...)` link
/// in a SKILL.md resolves to a file under the skill's directory.
///
/// Other link destinations (URLs, anchors, sibling skills) are out of scope.
#[must_use]
pub fn check(skill_dir: &Path, skill_path: &Path, content: &str) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    for (event, range) in Parser::new(content).into_offset_iter() {
        let (Event::Start(Tag::Link { dest_url, .. }) | Event::Start(Tag::Image { dest_url, .. })) =
            event
        else {
            continue;
        };

        let dest = dest_url.as_ref();
        if !(dest.starts_with("references/") || dest.starts_with("examples/")) {
            continue;
        }

        let line = line_of_offset(content, range.start);
        let path_part = dest.split(['#', '?']).next().unwrap_or(dest);

        if path_part.split('/').any(|segment| segment == "..") {
            out.push(
                Diagnostic::error(
                    Rule::BrokenLink,
                    skill_path,
                    format!("link '{dest}' escapes the skill directory"),
                )
                .at_line(line),
            );
            continue;
        }

        if !skill_dir.join(path_part).is_file() {
            out.push(
                Diagnostic::error(
                    Rule::BrokenLink,
                    skill_path,
                    format!("link '{dest}' does not resolve to a file"),
                )
                .at_line(line),
            );
        }
    }

    out
}

fn line_of_offset(content: &str, offset: usize) -> usize {
    content[..offset].bytes().filter(|&b| b == b'\n').count() + 1
}
