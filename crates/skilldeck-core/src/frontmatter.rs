use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::SkillError;

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 1024;

/// Typed view of a SKILL.md front-matter block.
///
/// `name` and `description` are required; `description` is the sole activation
/// signal. `metadata` is an open mapping with no enforced schema beyond the
/// accessors below for the fields authors actually use.
#[derive(Debug, Clone, Deserialize)]
pub struct Frontmatter {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_yml::Value>,
}

impl Frontmatter {
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.metadata.get("author").and_then(serde_yml::Value::as_str)
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.metadata.get("version").and_then(serde_yml::Value::as_str)
    }

    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        self.metadata
            .get("tags")
            .and_then(serde_yml::Value::as_sequence)
            .map(|seq| {
                seq.iter()
                    .filter_map(serde_yml::Value::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check the structural invariants on the required fields.
    ///
    /// # Errors
    ///
    /// Returns `SkillError::Invalid` when `name` is empty, too long, or not
    /// kebab-case, or when `description` is empty or exceeds the length cap.
    pub fn validate(&self) -> Result<(), SkillError> {
        if self.name.is_empty() {
            return Err(SkillError::Invalid("'name' must not be empty".into()));
        }
        if self.name.len() > MAX_NAME_LEN {
            return Err(SkillError::Invalid(format!(
                "'name' exceeds {MAX_NAME_LEN} characters"
            )));
        }
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(SkillError::Invalid(format!(
                "'name' must be kebab-case (lowercase letters, digits, hyphens): {}",
                self.name
            )));
        }
        if self.description.trim().is_empty() {
            return Err(SkillError::Invalid(
                "'description' must not be empty".into(),
            ));
        }
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(SkillError::Invalid(format!(
                "'description' exceeds {MAX_DESCRIPTION_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Split a SKILL.md document into its raw YAML block and Markdown body.
///
/// The closing delimiter must be a line that is exactly `---` (trailing
/// whitespace aside); a `----` ruler or `---text` line inside the YAML block
/// does not close it.
///
/// # Errors
///
/// Returns `SkillError::Frontmatter` when the opening `---` is missing or the
/// block is never closed.
pub fn split(content: &str) -> Result<(&str, &str), SkillError> {
    let content = content.trim_start_matches('\u{feff}');
    let rest = content
        .strip_prefix("---")
        .ok_or_else(|| SkillError::Frontmatter("missing opening '---' delimiter".into()))?;

    let mut search = 0;
    let close = loop {
        let Some(found) = rest[search..].find("\n---") else {
            return Err(SkillError::Frontmatter("unclosed front-matter block".into()));
        };
        let pos = search + found;
        let line_rest = &rest[pos + 4..];
        let line_end = line_rest.find('\n').unwrap_or(line_rest.len());
        if line_rest[..line_end].trim().is_empty() {
            break pos;
        }
        search = pos + 1;
    };

    let yaml = &rest[..close];
    let after = &rest[close + 4..];
    let body = match after.find('\n') {
        Some(i) => &after[i + 1..],
        None => "",
    };

    Ok((yaml, body))
}

/// Parse and validate a full SKILL.md document.
///
/// Returns the front-matter and the trimmed Markdown body.
///
/// # Errors
///
/// Returns an error when the delimiters are malformed, the YAML does not
/// deserialise, or a required field fails validation.
pub fn parse(content: &str) -> Result<(Frontmatter, &str), SkillError> {
    let (yaml, body) = split(content)?;
    let meta: Frontmatter = serde_yml::from_str(yaml)?;
    meta.validate()?;
    Ok((meta, body.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let (meta, body) =
            parse("---\nname: test-skill\ndescription: A test skill.\n---\n# Body\nHello").unwrap();
        assert_eq!(meta.name, "test-skill");
        assert_eq!(meta.description, "A test skill.");
        assert!(meta.license.is_none());
        assert_eq!(body, "# Body\nHello");
    }

    #[test]
    fn parse_full_metadata() {
        let content = "---\n\
            name: writing-docs\n\
            description: Documentation templates and tone.\n\
            license: Unlicense OR 0BSD\n\
            metadata:\n\
            \x20 author: someone\n\
            \x20 version: \"1.2.0\"\n\
            \x20 tags:\n\
            \x20   - docs\n\
            \x20   - style\n\
            ---\nbody";
        let (meta, _) = parse(content).unwrap();
        assert_eq!(meta.license.as_deref(), Some("Unlicense OR 0BSD"));
        assert_eq!(meta.author(), Some("someone"));
        assert_eq!(meta.version(), Some("1.2.0"));
        assert_eq!(meta.tags(), vec!["docs", "style"]);
    }

    #[test]
    fn missing_opening_delimiter() {
        let err = parse("no front-matter here").unwrap_err();
        assert!(err.to_string().contains("missing opening"));
    }

    #[test]
    fn unclosed_block() {
        let err = parse("---\nname: x\ndescription: y\n").unwrap_err();
        assert!(err.to_string().contains("unclosed"));
    }

    #[test]
    fn dashed_line_is_not_a_closing_delimiter() {
        let (yaml, body) = split("---\nname: x\n---- not a close\n---\nbody").unwrap();
        assert!(yaml.contains("---- not a close"));
        assert_eq!(body, "body");
    }

    #[test]
    fn closing_delimiter_allows_trailing_whitespace() {
        let (yaml, body) = split("---\nname: x\n---   \nbody").unwrap();
        assert_eq!(yaml, "\nname: x");
        assert_eq!(body, "body");
    }

    #[test]
    fn dashed_lines_alone_never_close_the_block() {
        let err = parse("---\nname: x\n---- still open\n").unwrap_err();
        assert!(err.to_string().contains("unclosed"));
    }

    #[test]
    fn missing_description_is_an_error() {
        assert!(parse("---\nname: test\n---\nbody").is_err());
    }

    #[test]
    fn empty_description_is_an_error() {
        let err = parse("---\nname: test\ndescription: \"  \"\n---\nbody").unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn non_kebab_name_is_an_error() {
        let err = parse("---\nname: Bad_Name\ndescription: x\n---\n").unwrap_err();
        assert!(err.to_string().contains("kebab-case"));
    }

    #[test]
    fn overlong_name_is_an_error() {
        let name = "a".repeat(MAX_NAME_LEN + 1);
        let content = format!("---\nname: {name}\ndescription: x\n---\n");
        assert!(parse(&content).is_err());
    }

    #[test]
    fn overlong_description_is_an_error() {
        let description = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        let content = format!("---\nname: test\ndescription: {description}\n---\n");
        assert!(parse(&content).is_err());
    }

    #[test]
    fn body_may_be_empty() {
        let (_, body) = parse("---\nname: test\ndescription: x\n---").unwrap();
        assert_eq!(body, "");
    }

    #[test]
    fn tags_absent_yields_empty() {
        let (meta, _) = parse("---\nname: test\ndescription: x\n---\n").unwrap();
        assert!(meta.tags().is_empty());
        assert!(meta.author().is_none());
    }

    mod properties {
        use proptest::prelude::*;

        use super::super::*;

        proptest! {
            #[test]
            fn split_never_panics(content in ".*") {
                let _ = split(&content);
            }

            #[test]
            fn body_survives_parsing(body in "[a-zA-Z0-9 .\n]*") {
                let content = format!("---\nname: prop-skill\ndescription: prop\n---\n{body}");
                let (_, parsed) = parse(&content).unwrap();
                prop_assert_eq!(parsed, body.trim());
            }
        }
    }
}
