use std::collections::HashSet;

use crate::loader::Skill;

const MIN_TOKEN_LEN: usize = 3;

// Function words that carry no activation signal in a description.
const STOPWORDS: &[&str] = &[
    "and", "are", "for", "from", "has", "have", "how", "its", "not", "that", "the", "this", "use",
    "used", "when", "with", "you", "your",
];

fn tokenize(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
        .filter(|word| !STOPWORDS.contains(&word.as_str()))
        .collect()
}

/// A skill paired with its activation score for one query.
#[derive(Debug)]
pub struct ScoredSkill<'a> {
    pub skill: &'a Skill,
    pub score: f32,
}

/// Keyword-overlap activation matcher.
///
/// Indexes each skill's name and description tokens once; queries score by
/// token overlap normalised for description and query length. The description
/// is the sole activation signal, so a skill with an empty token set is
/// unmatchable and left out of the index. The matcher borrows the slice it
/// indexed, so scores can only ever be attributed to those skills.
pub struct SkillMatcher<'a> {
    skills: &'a [Skill],
    tokens: Vec<(usize, HashSet<String>)>,
}

impl<'a> SkillMatcher<'a> {
    #[must_use]
    pub fn new(skills: &'a [Skill]) -> Self {
        let tokens = skills
            .iter()
            .enumerate()
            .map(|(idx, skill)| {
                let mut set = tokenize(skill.description());
                set.extend(tokenize(skill.name()));
                (idx, set)
            })
            .filter(|(_, set)| !set.is_empty())
            .collect();

        Self { skills, tokens }
    }

    /// Rank skills against a free-text query, best match first.
    ///
    /// Skills sharing no tokens with the query are excluded; an empty or
    /// all-stopword query yields no matches.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn match_skills(&self, query: &str, limit: usize) -> Vec<ScoredSkill<'a>> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .tokens
            .iter()
            .filter_map(|(idx, set)| {
                let overlap = set.intersection(&query_tokens).count();
                if overlap == 0 {
                    return None;
                }
                let denom = (set.len() as f32 * query_tokens.len() as f32).sqrt();
                Some((*idx, overlap as f32 / denom))
            })
            .collect();

        scored.sort_unstable_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        scored
            .into_iter()
            .filter_map(|(idx, score)| {
                self.skills.get(idx).map(|skill| ScoredSkill { skill, score })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::frontmatter::Frontmatter;

    fn make_skill(name: &str, description: &str) -> Skill {
        Skill {
            meta: Frontmatter {
                name: name.into(),
                description: description.into(),
                license: None,
                metadata: std::collections::BTreeMap::new(),
            },
            body: String::new(),
            dir: PathBuf::new(),
        }
    }

    #[test]
    fn ranks_by_overlap() {
        let skills = vec![
            make_skill("commit-style", "Commit message formats and conventions"),
            make_skill("docs-style", "Documentation templates and tone"),
            make_skill("tooling", "Preferred build tooling"),
        ];

        let matcher = SkillMatcher::new(&skills);
        let matched = matcher.match_skills("write a commit message", 5);

        assert!(!matched.is_empty());
        assert_eq!(matched[0].skill.name(), "commit-style");
    }

    #[test]
    fn respects_limit() {
        let skills = vec![
            make_skill("one", "shared keyword signal"),
            make_skill("two", "shared keyword signal"),
            make_skill("three", "shared keyword signal"),
        ];

        let matcher = SkillMatcher::new(&skills);
        let matched = matcher.match_skills("keyword", 2);
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn zero_overlap_is_excluded() {
        let skills = vec![make_skill("docs", "documentation templates")];

        let matcher = SkillMatcher::new(&skills);
        assert!(matcher.match_skills("kernel scheduling", 5).is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        let skills = vec![make_skill("docs", "documentation templates")];

        let matcher = SkillMatcher::new(&skills);
        assert!(matcher.match_skills("", 5).is_empty());
        assert!(matcher.match_skills("the and for", 5).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let skills = vec![make_skill("docs", "Documentation Templates")];

        let matcher = SkillMatcher::new(&skills);
        let matched = matcher.match_skills("DOCUMENTATION", 5);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn scores_attribute_to_the_indexed_skills() {
        let skills = vec![
            make_skill("alpha-notes", "alpha topics only"),
            make_skill("beta-notes", "beta topics only"),
        ];

        let matcher = SkillMatcher::new(&skills);
        let matched = matcher.match_skills("beta", 5);

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].skill.name(), "beta-notes");
        assert!(std::ptr::eq(matched[0].skill, &skills[1]));
    }

    #[test]
    fn name_tokens_count_toward_matching() {
        let skills = vec![make_skill("british-spelling", "Writes the author's way")];

        let matcher = SkillMatcher::new(&skills);
        let matched = matcher.match_skills("british spelling", 5);
        assert_eq!(matched.len(), 1);
    }
}
