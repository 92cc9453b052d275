use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::loader::{Skill, load_skill};

/// In-memory index of a skill collection, keyed by front-matter `name`.
///
/// Base paths are scanned in order; when two directories declare the same
/// name, the later path wins (project-level collections shadow user-level
/// ones) and the shadowed entry is recorded.
#[derive(Debug, Default)]
pub struct SkillRegistry {
    skills: Vec<Skill>,
    by_name: HashMap<String, usize>,
    errors: Vec<(PathBuf, String)>,
    shadowed: Vec<(String, PathBuf)>,
}

impl SkillRegistry {
    /// Scan base directories for `*/SKILL.md` and load all valid skills.
    ///
    /// Invalid files are logged with `tracing::warn` and recorded in
    /// [`errors`](Self::errors); a missing base directory yields no skills.
    pub fn load(paths: &[impl AsRef<Path>]) -> Self {
        let mut registry = Self::default();
        for base in paths {
            registry.scan_base(base.as_ref());
        }
        registry
    }

    fn scan_base(&mut self, base: &Path) {
        let Ok(entries) = std::fs::read_dir(base) else {
            tracing::warn!("cannot read skills directory: {}", base.display());
            return;
        };

        let mut dirs: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        for dir in dirs {
            let skill_path = dir.join("SKILL.md");
            if !skill_path.is_file() {
                continue;
            }
            match load_skill(&skill_path) {
                Ok(skill) => self.insert(skill),
                Err(e) => {
                    tracing::warn!("skipping {}: {e}", skill_path.display());
                    self.errors.push((skill_path, e.to_string()));
                }
            }
        }
    }

    fn insert(&mut self, skill: Skill) {
        if let Some(&idx) = self.by_name.get(skill.name()) {
            let previous = std::mem::replace(&mut self.skills[idx], skill);
            self.shadowed.push((previous.meta.name, previous.dir));
        } else {
            self.by_name.insert(skill.meta.name.clone(), self.skills.len());
            self.skills.push(skill);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.by_name.get(name).map(|&idx| &self.skills[idx])
    }

    #[must_use]
    pub fn all(&self) -> &[Skill] {
        &self.skills
    }

    /// Files that were present but failed to load, with their error text.
    #[must_use]
    pub fn errors(&self) -> &[(PathBuf, String)] {
        &self.errors
    }

    /// Entries replaced by a later base path declaring the same name.
    #[must_use]
    pub fn shadowed(&self) -> &[(String, PathBuf)] {
        &self.shadowed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
