//! Structural and style linter for SKILL.md skill collections.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub mod checks;
pub mod diagnostic;
pub mod links;
pub mod sizes;
pub mod style;

pub use diagnostic::{Diagnostic, Report, Rule, Severity};

use sizes::SizeStatus;
use skilldeck_core::config::LintConfig;

#[derive(Debug, Clone)]
pub struct LintOptions {
    pub max_line_length: usize,
    pub warn_lines: usize,
    pub fail_lines: usize,
    pub british_spelling: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            max_line_length: 100,
            warn_lines: 500,
            fail_lines: 800,
            british_spelling: true,
        }
    }
}

impl From<&LintConfig> for LintOptions {
    fn from(config: &LintConfig) -> Self {
        Self {
            max_line_length: config.max_line_length,
            warn_lines: config.warn_lines,
            fail_lines: config.fail_lines,
            british_spelling: config.british_spelling,
        }
    }
}

/// Run every check over the skill directories under the given base paths.
///
/// All paths are treated as one collection for duplicate-name purposes. An
/// unreadable base path is logged and skipped.
#[must_use]
pub fn lint_paths(paths: &[impl AsRef<Path>], options: &LintOptions) -> Report {
    let mut report = Report::default();
    let mut seen_names: HashMap<String, PathBuf> = HashMap::new();

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
            let check = checks::check_skill_dir(&dir);
            report.extend(check.diagnostics);

            if let Some(name) = &check.declared_name
                && let Some(previous) = seen_names.insert(name.clone(), dir.clone())
            {
                report.push(Diagnostic::error(
                    Rule::DuplicateName,
                    &check.skill_path,
                    format!("name '{name}' already declared by {}", previous.display()),
                ));
            }

            let Some(content) = &check.content else {
                continue;
            };

            report.extend(links::check(&dir, &check.skill_path, content));
            report.extend(style::check(&check.skill_path, content, options));

            let dir_name = dir.file_name().and_then(|f| f.to_str()).unwrap_or("?");
            let size = sizes::measure(dir_name, content, options);
            match size.status {
                SizeStatus::Ok => {}
                SizeStatus::Warning => report.push(Diagnostic::warning(
                    Rule::OversizedSkill,
                    &check.skill_path,
                    format!("{} lines (optimal target {})", size.lines, options.warn_lines),
                )),
                SizeStatus::TooLong => report.push(Diagnostic::error(
                    Rule::OversizedSkill,
                    &check.skill_path,
                    format!("{} lines (hard limit {})", size.lines, options.fail_lines),
                )),
            }
        }
    }

    report
}
