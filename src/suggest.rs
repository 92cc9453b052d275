use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher};

/// Closest skill names to `query`, best first.
#[must_use]
pub fn closest_names<'a>(
    query: &str,
    names: impl IntoIterator<Item = &'a str>,
    limit: usize,
) -> Vec<String> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);

    let mut matches = pattern.match_list(names, &mut matcher);
    matches.truncate(limit);
    matches.into_iter().map(|(name, _)| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_near_miss() {
        let names = ["commit-style", "docs-style", "tooling"];
        let close = closest_names("comit-style", names, 2);
        assert_eq!(close.first().map(String::as_str), Some("commit-style"));
    }

    #[test]
    fn no_match_yields_empty() {
        let names = ["commit-style"];
        assert!(closest_names("zzzzqqqq", names, 3).is_empty());
    }
}
