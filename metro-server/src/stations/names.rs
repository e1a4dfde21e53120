//! Resolving user-typed station names.

use serde::Serialize;
use tracing::debug;

use crate::domain::normalize_station_name;
use crate::network::TransitGraph;

use super::fuzzy::{DEFAULT_THRESHOLD, FuzzyMatch, FuzzyMatcher, Levenshtein, Scorer};

/// Configuration for station name resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Minimum fuzzy score (inclusive, 0.0–1.0) for a suggestion.
    pub cutoff: f64,
}

impl ResolverConfig {
    /// Create a configuration with the given fuzzy cutoff.
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_THRESHOLD,
        }
    }
}

/// Outcome of resolving a station name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Resolution {
    /// The input names a station, possibly after case folding.
    Exact(String),
    /// No station has this name; this is the closest one.
    Suggestion(String),
    /// Nothing close enough.
    NoMatch,
}

impl Resolution {
    /// Returns true if the input resolved to a station.
    pub fn matched(&self) -> bool {
        !matches!(self, Resolution::NoMatch)
    }

    /// The resolved station name, if any.
    pub fn canonical_name(&self) -> Option<&str> {
        match self {
            Resolution::Exact(name) | Resolution::Suggestion(name) => Some(name),
            Resolution::NoMatch => None,
        }
    }

    /// Returns true if the name came from fuzzy matching.
    pub fn was_suggestion(&self) -> bool {
        matches!(self, Resolution::Suggestion(_))
    }
}

/// Resolves free text against the stations of one graph.
///
/// Resolution tries, in order: the normalised name, a case-insensitive
/// lookup, then the best fuzzy match at or above the configured cutoff.
pub struct StationResolver<'g, S = Levenshtein> {
    graph: &'g TransitGraph,
    matcher: FuzzyMatcher<S>,
    config: ResolverConfig,
}

impl<'g> StationResolver<'g> {
    /// Create a resolver with the default scorer and cutoff.
    pub fn new(graph: &'g TransitGraph) -> Self {
        Self::with_config(graph, ResolverConfig::default())
    }

    /// Create a resolver with the default scorer and a custom cutoff.
    pub fn with_config(graph: &'g TransitGraph, config: ResolverConfig) -> Self {
        Self::with_scorer(graph, Levenshtein, config)
    }
}

impl<'g, S: Scorer> StationResolver<'g, S> {
    /// Create a resolver with a custom scorer and configuration.
    pub fn with_scorer(graph: &'g TransitGraph, scorer: S, config: ResolverConfig) -> Self {
        Self {
            graph,
            matcher: FuzzyMatcher::new(scorer),
            config,
        }
    }

    /// Resolve `raw` to a station name.
    pub fn resolve(&self, raw: &str) -> Resolution {
        let name = normalize_station_name(raw);
        if name.is_empty() {
            return Resolution::NoMatch;
        }

        if let Some(station) = self.graph.station(&name) {
            return Resolution::Exact(station.name().to_string());
        }
        if let Some(station) = self.graph.station_ignore_case(&name) {
            return Resolution::Exact(station.name().to_string());
        }

        match self
            .matcher
            .best_match(&name, self.graph.station_names(), self.config.cutoff)
        {
            Some(m) => {
                debug!(input = raw, suggestion = %m.name, score = m.score, "Fuzzy station match");
                Resolution::Suggestion(m.name)
            }
            None => {
                debug!(input = raw, "No station matched");
                Resolution::NoMatch
            }
        }
    }

    /// Up to `limit` stations similar to `raw`, best first.
    ///
    /// Unlike [`resolve`](Self::resolve) this always scores every station
    /// and applies the cutoff, so an exact name is returned with score 1.0.
    pub fn suggestions(&self, raw: &str, limit: usize) -> Vec<FuzzyMatch> {
        self.matcher.search(
            &normalize_station_name(raw),
            self.graph.station_names(),
            limit,
            self.config.cutoff,
        )
    }

    /// Completions for a partially typed station name.
    pub fn autocomplete(&self, partial: &str, limit: usize) -> Vec<String> {
        self.matcher
            .autocomplete(partial, self.graph.station_names(), limit)
    }
}
