//! Station name lookup.
//!
//! Turns free text typed by a user into a canonical station name: exact
//! and case-insensitive matches first, then a fuzzy "did you mean"
//! suggestion. The fuzzy scoring is pluggable through [`Scorer`].

mod fuzzy;
mod names;

pub use fuzzy::{
    DEFAULT_THRESHOLD, FuzzyMatch, FuzzyMatcher, JaroWinkler, Levenshtein, Scorer, TokenSet,
};
pub use names::{Resolution, ResolverConfig, StationResolver};
