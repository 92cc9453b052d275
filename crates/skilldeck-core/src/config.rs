use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub skills: SkillsConfig,
    pub lint: LintConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    /// Base directories scanned for `*/SKILL.md`, lowest priority first.
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    pub max_line_length: usize,
    /// Line count above which a skill is flagged as a warning.
    pub warn_lines: usize,
    /// Line count above which a skill is an error.
    pub fail_lines: usize,
    pub british_spelling: bool,
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str::<Self>(&content)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SKILLDECK_SKILLS_PATHS") {
            self.skills.paths = v.split(',').map(PathBuf::from).collect();
        }
        if let Ok(v) = std::env::var("SKILLDECK_MAX_LINE_LENGTH")
            && let Ok(n) = v.parse()
        {
            self.lint.max_line_length = n;
        }
        if let Ok(v) = std::env::var("SKILLDECK_BRITISH_SPELLING")
            && let Ok(b) = v.parse()
        {
            self.lint.british_spelling = b;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skills: SkillsConfig::default(),
            lint: LintConfig::default(),
        }
    }
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from("./skills")],
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            max_line_length: 100,
            warn_lines: 500,
            fail_lines: 800,
            british_spelling: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let config = Config::load(Path::new("/nonexistent/skilldeck.toml")).unwrap();
        assert_eq!(config.skills.paths, vec![PathBuf::from("./skills")]);
        assert_eq!(config.lint.max_line_length, 100);
        assert_eq!(config.lint.warn_lines, 500);
        assert_eq!(config.lint.fail_lines, 800);
        assert!(config.lint.british_spelling);
    }

    #[test]
    fn parse_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skilldeck.toml");
        std::fs::write(
            &path,
            r#"
[skills]
paths = ["./skills", "/home/me/.skills"]

[lint]
max_line_length = 120
british_spelling = false
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.skills.paths.len(), 2);
        assert_eq!(config.lint.max_line_length, 120);
        assert!(!config.lint.british_spelling);
        // unspecified fields keep their defaults
        assert_eq!(config.lint.warn_lines, 500);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skilldeck.toml");
        std::fs::write(&path, "[skills\npaths = 3").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
