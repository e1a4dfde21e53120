//! Approximate string matching.
//!
//! Scores are on a 0.0–1.0 scale where 1.0 is an exact match. Matching
//! is case-insensitive: both sides are lower-cased before scoring.

use std::collections::BTreeSet;

/// Default minimum score for [`FuzzyMatcher::search`] results.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Minimum score for the fuzzy tier of [`FuzzyMatcher::autocomplete`].
const AUTOCOMPLETE_THRESHOLD: f64 = 0.4;

/// A string similarity strategy.
///
/// Implementations return a score in `0.0..=1.0`; higher is more similar.
/// Any `Fn(&str, &str) -> f64` is a scorer.
pub trait Scorer {
    /// Similarity between `a` and `b`.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&str, &str) -> f64,
{
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Normalised Levenshtein edit distance: `1 - distance / longer length`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl Scorer for Levenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }
}

/// Jaro-Winkler similarity, which favours strings sharing a prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl Scorer for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::jaro_winkler(a, b)
    }
}

/// Token-set overlap, insensitive to word order and repeated words.
///
/// Words common to both strings are compared against each side's
/// remaining words; a string whose words are a subset of the other's
/// scores 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSet;

impl Scorer for TokenSet {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let ta: BTreeSet<&str> = a.split_whitespace().collect();
        let tb: BTreeSet<&str> = b.split_whitespace().collect();

        let common: Vec<&str> = ta.intersection(&tb).copied().collect();
        let only_a: Vec<&str> = ta.difference(&tb).copied().collect();
        let only_b: Vec<&str> = tb.difference(&ta).copied().collect();

        let sect = common.join(" ");
        let with_a = join_nonempty(&sect, &only_a.join(" "));
        let with_b = join_nonempty(&sect, &only_b.join(" "));

        if sect.is_empty() {
            return strsim::normalized_levenshtein(&with_a, &with_b);
        }

        [
            strsim::normalized_levenshtein(&sect, &with_a),
            strsim::normalized_levenshtein(&sect, &with_b),
            strsim::normalized_levenshtein(&with_a, &with_b),
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

fn join_nonempty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{a} {b}"),
    }
}

/// A scored candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// The candidate as given.
    pub name: String,
    /// Similarity to the query, 0.0–1.0.
    pub score: f64,
}

/// Ranks candidate strings against a query.
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher<S = Levenshtein> {
    scorer: S,
}

impl<S: Scorer> FuzzyMatcher<S> {
    /// Create a matcher using `scorer`.
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    /// Case-insensitive similarity between two strings.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        self.scorer.similarity(&a.to_lowercase(), &b.to_lowercase())
    }

    /// Up to `limit` candidates scoring at least `threshold`, best first.
    ///
    /// Equal scores are ordered by name, so results are stable whatever
    /// order the candidates come in. An empty query matches nothing.
    pub fn search<'c, I>(
        &self,
        query: &str,
        choices: I,
        limit: usize,
        threshold: f64,
    ) -> Vec<FuzzyMatch>
    where
        I: IntoIterator<Item = &'c str>,
    {
        let query = query.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut matches: Vec<FuzzyMatch> = choices
            .into_iter()
            .filter_map(|name| {
                let score = self.scorer.similarity(&query, &name.to_lowercase());
                (score >= threshold).then(|| FuzzyMatch {
                    name: name.to_string(),
                    score,
                })
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        matches.truncate(limit);
        matches
    }

    /// The single best candidate scoring at least `threshold`.
    pub fn best_match<'c, I>(&self, query: &str, choices: I, threshold: f64) -> Option<FuzzyMatch>
    where
        I: IntoIterator<Item = &'c str>,
    {
        self.search(query, choices, 1, threshold).into_iter().next()
    }

    /// Suggestions for a partially typed name.
    ///
    /// Candidates with a word starting with the query come first, then
    /// candidates containing it anywhere, each group sorted by name. Any
    /// remaining room is filled with fuzzy matches.
    pub fn autocomplete<'c, I>(&self, query: &str, choices: I, limit: usize) -> Vec<String>
    where
        I: IntoIterator<Item = &'c str>,
    {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }
        let choices: Vec<&str> = choices.into_iter().collect();

        let mut word_prefix = Vec::new();
        let mut substring = Vec::new();
        for &name in &choices {
            let lower = name.to_lowercase();
            let word_start = lower.split_whitespace().any(|w| w.starts_with(&needle));
            if lower.starts_with(&needle) || word_start {
                word_prefix.push(name);
            } else if lower.contains(&needle) {
                substring.push(name);
            }
        }
        word_prefix.sort_unstable();
        substring.sort_unstable();

        let mut out: Vec<String> = word_prefix
            .into_iter()
            .chain(substring)
            .take(limit)
            .map(str::to_string)
            .collect();

        if out.len() < limit {
            let rest = choices
                .iter()
                .copied()
                .filter(|name| !out.iter().any(|chosen| chosen.as_str() == *name));
            let fuzzy = self.search(&needle, rest, limit - out.len(), AUTOCOMPLETE_THRESHOLD);
            out.extend(fuzzy.into_iter().map(|m| m.name));
        }

        out
    }
}
