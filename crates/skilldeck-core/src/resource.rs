use std::path::{Path, PathBuf};

use crate::error::SkillError;

/// On-demand files shipped alongside a SKILL.md.
#[derive(Clone, Debug, Default)]
pub struct SkillResources {
    pub references: Vec<PathBuf>,
    pub examples: Vec<PathBuf>,
}

impl SkillResources {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.references.is_empty() && self.examples.is_empty()
    }
}

/// Enumerate the `references/` and `examples/` files of a skill directory.
#[must_use]
pub fn discover_resources(skill_dir: &Path) -> SkillResources {
    let mut resources = SkillResources::default();

    for (subdir, target) in [
        ("references", &mut resources.references),
        ("examples", &mut resources.examples),
    ] {
        let dir = skill_dir.join(subdir);
        if let Ok(entries) = std::fs::read_dir(&dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    target.push(path);
                }
            }
            target.sort();
        }
    }

    resources
}

/// Load a resource file by its path relative to the skill directory.
///
/// # Errors
///
/// Returns an error if the path escapes the skill directory or the file
/// cannot be read.
pub fn load_resource(skill_dir: &Path, relative_path: &str) -> Result<Vec<u8>, SkillError> {
    let canonical_base = skill_dir.canonicalize().map_err(|e| {
        SkillError::Resource(format!(
            "cannot canonicalise skill directory {}: {e}",
            skill_dir.display()
        ))
    })?;

    let target = skill_dir.join(relative_path);
    let canonical_target = target.canonicalize().map_err(|e| {
        SkillError::Resource(format!("cannot resolve {}: {e}", target.display()))
    })?;

    if !canonical_target.starts_with(&canonical_base) {
        return Err(SkillError::Resource(format!(
            "path traversal: {relative_path} escapes {}",
            skill_dir.display()
        )));
    }

    std::fs::read(&canonical_target).map_err(|source| SkillError::Io {
        path: canonical_target,
        source,
    })
}
