use std::path::{Path, PathBuf};

use crate::error::SkillError;
use crate::frontmatter::{self, Frontmatter};

/// A fully loaded skill document: front-matter, Markdown body, and the
/// directory holding its on-demand resources.
#[derive(Debug, Clone)]
pub struct Skill {
    pub meta: Frontmatter,
    pub body: String,
    pub dir: PathBuf,
}

impl Skill {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.meta.description
    }

    /// Name of the directory containing the SKILL.md, when it is valid UTF-8.
    #[must_use]
    pub fn dir_name(&self) -> Option<&str> {
        self.dir.file_name().and_then(|f| f.to_str())
    }
}

/// Load a skill from a `SKILL.md` path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the front-matter is
/// missing, malformed, or fails validation.
pub fn load_skill(path: &Path) -> Result<Skill, SkillError> {
    let content = std::fs::read_to_string(path).map_err(|source| SkillError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (meta, body) = frontmatter::parse(&content)?;
    let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();

    Ok(Skill {
        meta,
        body: body.to_string(),
        dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_skill(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("SKILL.md");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_valid_skill() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_skill(
            dir.path(),
            "---\nname: commit-style\ndescription: Commit message conventions.\n---\nUse imperative mood.",
        );

        let skill = load_skill(&path).unwrap();
        assert_eq!(skill.name(), "commit-style");
        assert_eq!(skill.body, "Use imperative mood.");
        assert_eq!(skill.dir, dir.path());
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_skill(&dir.path().join("SKILL.md")).unwrap_err();
        assert!(matches!(err, SkillError::Io { .. }));
    }

    #[test]
    fn invalid_frontmatter_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_skill(dir.path(), "no front-matter");
        assert!(load_skill(&path).is_err());
    }
}
