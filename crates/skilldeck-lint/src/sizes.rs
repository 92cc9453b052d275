use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::LintOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeStatus {
    Ok,
    Warning,
    TooLong,
}

impl SizeStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::TooLong => "TOO LONG",
        }
    }

    #[must_use]
    fn emoji(self) -> &'static str {
        match self {
            Self::Ok => "\u{1f7e2}",
            Self::Warning => "\u{1f7e1}",
            Self::TooLong => "\u{1f534}",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillSize {
    pub name: String,
    pub lines: usize,
    pub words: usize,
    pub status: SizeStatus,
}

/// Measure one SKILL.md. `name` is the skill directory name so that even a
/// file with broken front-matter still shows up in the table.
#[must_use]
pub fn measure(name: &str, content: &str, options: &LintOptions) -> SkillSize {
    let lines = content.split('\n').count();
    let words = content.split_whitespace().count();
    let status = if lines <= options.warn_lines {
        SizeStatus::Ok
    } else if lines <= options.fail_lines {
        SizeStatus::Warning
    } else {
        SizeStatus::TooLong
    };

    SkillSize {
        name: name.to_string(),
        lines,
        words,
        status,
    }
}

/// Measure every `*/SKILL.md` under the given base paths, sorted by skill name.
#[must_use]
pub fn collect(paths: &[impl AsRef<Path>], options: &LintOptions) -> Vec<SkillSize> {
    let mut sizes = Vec::new();

    for base in paths {
        let base = base.as_ref();
        let Ok(entries) = std::fs::read_dir(base) else {
            tracing::warn!("cannot read skills directory: {}", base.display());
            continue;
        };

        let mut dirs: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        for dir in dirs {
            let skill_path = dir.join("SKILL.md");
            let Ok(content) = std::fs::read_to_string(&skill_path) else {
                continue;
            };
            let name = dir
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("?")
                .to_string();
            sizes.push(measure(&name, &content, options));
        }
    }

    sizes.sort_by(|a, b| a.name.cmp(&b.name));
    sizes
}

/// Render the per-skill size table as Markdown, status as a traffic light.
#[must_use]
pub fn markdown_table(sizes: &[SkillSize]) -> String {
    let mut out = String::from("| skill | lines | words | status |\n|-------|-------|-------|--------|\n");
    for size in sizes {
        let _ = writeln!(
            out,
            "| `{}` | {} | {} | {} |",
            size.name,
            size.lines,
            size.words,
            size.status.emoji(),
        );
    }
    out
}
