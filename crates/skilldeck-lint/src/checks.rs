use std::path::{Path, PathBuf};

use skilldeck_core::frontmatter;

use crate::diagnostic::{Diagnostic, Rule};

/// Outcome of the per-directory structural checks.
///
/// `content` is carried forward so the link, style, and size passes do not
/// re-read the file; `declared_name` feeds collection-wide duplicate
/// detection.
pub struct SkillCheck {
    pub dir: PathBuf,
    pub skill_path: PathBuf,
    pub declared_name: Option<String>,
    pub content: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Check one skill directory: SKILL.md present, front-matter parseable and
/// valid, and front-matter `name` matching the directory name.
#[must_use]
pub fn check_skill_dir(dir: &Path) -> SkillCheck {
    let skill_path = dir.join("SKILL.md");
    let mut diagnostics = Vec::new();

    if !skill_path.is_file() {
        diagnostics.push(Diagnostic::warning(
            Rule::MissingSkillFile,
            dir,
            "directory has no SKILL.md",
        ));
        return SkillCheck {
            dir: dir.to_path_buf(),
            skill_path,
            declared_name: None,
            content: None,
            diagnostics,
        };
    }

    let content = match std::fs::read_to_string(&skill_path) {
        Ok(content) => content,
        Err(e) => {
            diagnostics.push(Diagnostic::error(
                Rule::InvalidFrontmatter,
                &skill_path,
                format!("cannot read file: {e}"),
            ));
            return SkillCheck {
                dir: dir.to_path_buf(),
                skill_path,
                declared_name: None,
                content: None,
                diagnostics,
            };
        }
    };

    let declared_name = match frontmatter::parse(&content) {
        Ok((meta, _)) => {
            let dir_name = dir.file_name().and_then(|f| f.to_str());
            if dir_name != Some(meta.name.as_str()) {
                diagnostics.push(Diagnostic::error(
                    Rule::NameMismatch,
                    &skill_path,
                    format!(
                        "front-matter name '{}' does not match directory name '{}'",
                        meta.name,
                        dir_name.unwrap_or("?"),
                    ),
                ));
            }
            Some(meta.name)
        }
        Err(e) => {
            diagnostics.push(Diagnostic::error(
                Rule::InvalidFrontmatter,
                &skill_path,
                e.to_string(),
            ));
            None
        }
    };

    SkillCheck {
        dir: dir.to_path_buf(),
        skill_path,
        declared_name,
        content: Some(content),
        diagnostics,
    }
}
