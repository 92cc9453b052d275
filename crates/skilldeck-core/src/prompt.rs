use std::fmt::Write;

use crate::loader::Skill;
use crate::resource::SkillResources;

// XML tag patterns (lowercase) that would break the prompt structure if a
// skill body emitted them verbatim. Matching is case-insensitive.
const SANITIZE_PATTERNS: &[(&str, &str)] = &[
    ("</skill>", "&lt;/skill&gt;"),
    ("<skill", "&lt;skill"),
    ("</instructions>", "&lt;/instructions&gt;"),
    ("<instructions", "&lt;instructions"),
    ("</available_skills>", "&lt;/available_skills&gt;"),
    ("<available_skills", "&lt;available_skills"),
];

/// Case-insensitive replacement of an ASCII `pattern` (given in lowercase).
fn replace_case_insensitive(src: &str, pattern: &str, replacement: &str) -> String {
    let lower = src.to_ascii_lowercase();
    let mut out = String::with_capacity(src.len());
    let mut last = 0;
    for (start, _) in lower.match_indices(pattern) {
        if start < last {
            continue;
        }
        out.push_str(&src[last..start]);
        out.push_str(replacement);
        last = start + pattern.len();
    }
    out.push_str(&src[last..]);
    out
}

/// Escape structural XML tags in text destined for prompt injection.
#[must_use]
pub fn sanitize(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, replacement) in SANITIZE_PATTERNS {
        out = replace_case_insensitive(&out, pattern, replacement);
    }
    out
}

/// Progressive-disclosure catalogue: names and descriptions only, so a host
/// can advertise the collection without paying for every body.
#[must_use]
pub fn format_catalogue(skills: &[Skill], max_entries: usize) -> String {
    if skills.is_empty() {
        return String::new();
    }

    let mut out = String::from("<available_skills>\n");
    for skill in skills.iter().take(max_entries) {
        let _ = writeln!(
            out,
            "  <skill name=\"{}\">{}</skill>",
            skill.name(),
            sanitize(skill.description()),
        );
    }
    if skills.len() > max_entries {
        let _ = writeln!(out, "  <!-- {} more not shown -->", skills.len() - max_entries);
    }
    out.push_str("</available_skills>");
    out
}

/// Full activation rendering for one skill: sanitised body plus the names of
/// on-demand resources, which the host loads separately when asked.
#[must_use]
pub fn format_activation(skill: &Skill, resources: &SkillResources) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<skill name=\"{}\">", skill.name());
    let _ = writeln!(out, "<instructions>\n{}\n</instructions>", sanitize(&skill.body));

    if !resources.is_empty() {
        out.push_str("<resources>\n");
        for (kind, paths) in [
            ("reference", &resources.references),
            ("example", &resources.examples),
        ] {
            for path in paths {
                if let Ok(rel) = path.strip_prefix(&skill.dir) {
                    let _ = writeln!(out, "{kind}: {}", rel.display());
                }
            }
        }
        out.push_str("</resources>\n");
    }

    out.push_str("</skill>");
    out
}
