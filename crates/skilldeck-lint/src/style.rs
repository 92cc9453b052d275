use std::path::Path;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::LintOptions;
use crate::diagnostic::{Diagnostic, Rule};

// American stems paired with their British replacements. Stems are matched at
// a word start with any suffix, so "colors" maps to "colours" and "analyzing"
// to "analysing". Ambiguous pairs ("center"/"centre", "license"/"licence")
// are left out; suffix substitution would mangle them.
const SPELLINGS: &[(&str, &str)] = &[
    ("analyz", "analys"),
    ("artifact", "artefact"),
    ("behavior", "behaviour"),
    ("catalog", "catalogue"),
    ("color", "colour"),
    ("customiz", "customis"),
    ("dialog", "dialogue"),
    ("favorite", "favourite"),
    ("flavor", "flavour"),
    ("gray", "grey"),
    ("initializ", "initialis"),
    ("neighbor", "neighbour"),
    ("normaliz", "normalis"),
    ("optimiz", "optimis"),
    ("organiz", "organis"),
    ("recogniz", "recognis"),
    ("serializ", "serialis"),
    ("summariz", "summaris"),
];

fn spelling_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let stems: Vec<&str> = SPELLINGS.iter().map(|(us, _)| *us).collect();
        let pattern = format!(r"\b(?:{})\w*", stems.join("|"));
        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .expect("static spelling pattern")
    })
}

fn fence_marker(line: &str) -> Option<&'static str> {
    if line.starts_with("```") {
        Some("```")
    } else if line.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// Style checks over a whole SKILL.md: line length and British spelling.
///
/// Fenced code blocks are exempt from both rules; a code sample is allowed to
/// be wide and to spell identifiers however the upstream project does.
#[must_use]
pub fn check(skill_path: &Path, content: &str, options: &LintOptions) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut fence: Option<&str> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim_start();
        if let Some(marker) = fence_marker(trimmed) {
            match fence {
                None => fence = Some(marker),
                Some(open) if open == marker => fence = None,
                // the other marker inside an open block is ordinary content
                Some(_) => {}
            }
            continue;
        }
        if fence.is_some() {
            continue;
        }

        let width = line.chars().count();
        if width > options.max_line_length && !line.contains("http://") && !line.contains("https://")
        {
            out.push(
                Diagnostic::warning(
                    Rule::LineTooLong,
                    skill_path,
                    format!("line is {width} characters (limit {})", options.max_line_length),
                )
                .at_line(line_no),
            );
        }

        if options.british_spelling {
            for m in spelling_regex().find_iter(line) {
                let word = m.as_str();
                let lower = word.to_lowercase();
                let Some((us, brit)) = SPELLINGS.iter().find(|(us, _)| lower.starts_with(us))
                else {
                    continue;
                };
                // "catalogue" and "dialogue" begin with their own American
                // stems; a word already in the British form is not a hit
                if lower.starts_with(brit) {
                    continue;
                }
                let suggestion = format!("{brit}{}", &lower[us.len()..]);
                out.push(
                    Diagnostic::warning(
                        Rule::AmericanSpelling,
                        skill_path,
                        format!("American spelling '{word}' (prefer '{suggestion}')"),
                    )
                    .at_line(line_no),
                );
            }
        }
    }

    out
}
