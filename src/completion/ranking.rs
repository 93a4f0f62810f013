//! Ranking and ordering of completion candidates
//!
//! A two-stage pass over the candidate pool:
//! 1. Fuzzy subsequence filter (nucleo) with the needle upper-cased and
//!    case-insensitive matching, so camelCase interior matches are found
//!    (query `sua` matches `saveUserAccount`). Matches keep the fuzzy
//!    engine's score order and are capped at `max_results`.
//! 2. A stable re-sort biasing camelCase/PascalCase identifiers and literal
//!    prefix matches over loose fuzzy hits: candidates containing an
//!    upper-case char first, then candidates starting with the literal
//!    (case-sensitive) query, then everything else. Ties preserve fuzzy
//!    order.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32String};

fn has_upper_case(text: &str) -> bool {
    text.chars().any(|c| c.is_uppercase())
}

/// Bias key for the re-sort stage; lower sorts first.
fn bias(text: &str, query: &str) -> u8 {
    if has_upper_case(text) {
        0
    } else if text.starts_with(query) {
        1
    } else {
        2
    }
}

/// Fuzzy-filter `pool` against `query` and order the result, bounded to
/// `max_results` items. An empty return means "no completions", never
/// "query not yet evaluated".
pub fn rank(pool: &[String], query: &str, max_results: usize) -> Vec<String> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let needle = query.to_uppercase();
    let pattern = Pattern::new(
        &needle,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
    );

    let mut scored: Vec<(u32, &String)> = pool
        .iter()
        .filter_map(|candidate| {
            let haystack = Utf32String::from(candidate.as_str());
            pattern
                .score(haystack.slice(..), &mut matcher)
                .map(|score| (score, candidate))
        })
        .collect();

    // Best fuzzy score first; stable so equal scores keep pool order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(max_results);

    let mut matches: Vec<String> = scored.into_iter().map(|(_, text)| text.clone()).collect();
    matches.sort_by_key(|text| bias(text, query));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    /// Case-insensitive subsequence check, the property every ranked result
    /// must satisfy.
    fn is_subsequence(needle: &str, haystack: &str) -> bool {
        let mut hay = haystack.chars().flat_map(char::to_lowercase);
        needle
            .chars()
            .flat_map(char::to_lowercase)
            .all(|n| hay.any(|h| h == n))
    }

    #[test]
    fn camel_case_ranks_above_literal_fuzzy_hit() {
        let ranked = rank(&pool(&["suave", "saveUserAccount"]), "sua", 8);
        assert_eq!(ranked, vec!["saveUserAccount".to_string(), "suave".to_string()]);
    }

    #[test]
    fn prefix_match_ranks_above_loose_match() {
        let ranked = rank(&pool(&["mesua", "suave"]), "sua", 8);
        assert_eq!(ranked[0], "suave");
    }

    #[test]
    fn results_are_bounded() {
        let many: Vec<String> = (0..30).map(|i| format!("item{i}")).collect();
        let ranked = rank(&many, "item", 8);
        assert_eq!(ranked.len(), 8);
        let ranked = rank(&many, "item", 3);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn every_result_matches_the_query() {
        let words = pool(&[
            "saveUserAccount",
            "suave",
            "getUserVar",
            "gurilla",
            "yoda",
            "error",
        ]);
        let ranked = rank(&words, "sua", 8);
        assert!(!ranked.is_empty());
        for item in &ranked {
            assert!(is_subsequence("sua", item), "{item:?} does not match");
        }
    }

    #[test]
    fn no_match_yields_empty() {
        let ranked = rank(&pool(&["yoda", "leia"]), "zzz", 8);
        assert!(ranked.is_empty());
    }

    #[test]
    fn empty_pool_yields_empty() {
        assert!(rank(&[], "sua", 8).is_empty());
    }
}
