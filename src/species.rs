//! Species name catalog and fuzzy name matching.
//!
//! A query matches a stored species name when any of these hold:
//!
//! 1. the query equals the name, ignoring case;
//! 2. the query is a single word and equals one of the name's words;
//! 3. the query's words appear as a contiguous, in-order run of the name's
//!    words.
//!
//! Words are separated by whitespace or hyphens and compared ignoring case.
//! So "tree lilac" matches "Japanese tree lilac", while "lilac tree" does not.

use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Default number of words kept per stored name.
pub const MAX_SUBWORDS: usize = 10;

type Subwords = SmallVec<[String; MAX_SUBWORDS]>;

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-'
}

/// Splits on whitespace and hyphens, dropping empty fragments.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|word| !word.is_empty())
}

/// Case-insensitive equality using full Unicode lowercase mapping.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// A stored species name, pre-split into its words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesName {
    name: String,
    subwords: Subwords,
}

impl SpeciesName {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_limit(name, MAX_SUBWORDS)
    }

    /// Keeps at most `max_subwords` words; later words are not matchable.
    pub fn with_limit(name: impl Into<String>, max_subwords: usize) -> Self {
        let name = name.into();
        let subwords = split_words(&name)
            .take(max_subwords)
            .map(str::to_string)
            .collect();
        Self { name, subwords }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn subwords(&self) -> &[String] {
        &self.subwords
    }

    /// Whether `query` matches this name under the rules in the module docs.
    pub fn matches(&self, query: &str) -> bool {
        if eq_ignore_case(query, &self.name) {
            return true;
        }

        let wanted: SmallVec<[&str; MAX_SUBWORDS]> = split_words(query).collect();
        if wanted.is_empty() || wanted.len() > self.subwords.len() {
            return false;
        }

        // A single-word query is a window of length one, so rules 2 and 3
        // share this scan.
        self.subwords.windows(wanted.len()).any(|window| {
            window
                .iter()
                .zip(wanted.iter())
                .all(|(have, want)| eq_ignore_case(have, want))
        })
    }
}

/// Convenience form of [`SpeciesName::matches`] for one-off checks.
pub fn matches(query: &str, stored_name: &str) -> bool {
    SpeciesName::new(stored_name).matches(query)
}

/// The set of distinct species names seen so far.
#[derive(Debug, Clone)]
pub struct SpeciesCatalog {
    names: BTreeMap<String, SpeciesName>,
    max_subwords: usize,
}

impl SpeciesCatalog {
    pub fn new() -> Self {
        Self::with_limit(MAX_SUBWORDS)
    }

    pub fn with_limit(max_subwords: usize) -> Self {
        Self {
            names: BTreeMap::new(),
            max_subwords,
        }
    }

    /// Adds `species` exactly as given. Returns `true` if it was not already
    /// present.
    pub fn add_species(&mut self, species: &str) -> bool {
        if self.names.contains_key(species) {
            return false;
        }
        self.names.insert(
            species.to_string(),
            SpeciesName::with_limit(species, self.max_subwords),
        );
        true
    }

    pub fn contains(&self, species: &str) -> bool {
        self.names.contains_key(species)
    }

    pub fn number_of_species(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Stored names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Every stored name that `partial_name` matches, without duplicates.
    pub fn get_matching_species(&self, partial_name: &str) -> Vec<String> {
        self.names
            .values()
            .filter(|species| species.matches(partial_name))
            .map(|species| species.as_str().to_string())
            .collect()
    }
}

impl Default for SpeciesCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_ignores_case() {
        assert!(matches("japanese TREE lilac", "Japanese tree lilac"));
        assert!(matches("", ""));
    }

    #[test]
    fn test_single_word_matches_any_subword() {
        assert!(matches("Japanese", "Japanese tree lilac"));
        assert!(matches("tree", "Japanese tree lilac"));
        // A one-word query equal to any subword matches, wherever it sits.
        assert!(matches("lilac", "Japanese tree lilac"));
        assert!(matches("LILAC", "Japanese tree lilac"));
        assert!(!matches("lila", "Japanese tree lilac"));
    }

    #[test]
    fn test_multi_word_requires_contiguous_run() {
        assert!(matches("tree lilac", "Japanese tree lilac"));
        assert!(matches("Japanese tree", "Japanese tree lilac"));
        assert!(!matches("Japanese lilac", "Japanese tree lilac"));
        assert!(!matches("lilac tree", "Japanese tree lilac"));
        assert!(!matches("tree lilac", "lilac"));
    }

    #[test]
    fn test_hyphen_is_a_separator() {
        assert!(matches("leaf", "two-leaf pine"));
        assert!(matches("two leaf", "two-leaf pine"));
        assert!(matches("leaf-pine", "two-leaf pine"));
        assert!(matches("red", "Norway maple-red"));
    }

    #[test]
    fn test_quoted_cultivar_words() {
        // The census quotes cultivar names; the quotes belong to the word.
        assert!(matches("'Schubert'", "'Schubert' chokecherry"));
        assert!(matches("chokecherry", "'Schubert' chokecherry"));
        assert!(!matches("Schubert", "'Schubert' chokecherry"));
    }

    #[test]
    fn test_blank_query_matches_nothing_but_empty_exact() {
        assert!(!matches(" ", "Japanese tree lilac"));
        assert!(!matches("-", "two-leaf pine"));
        assert!(!matches(" ", ""));
    }

    #[test]
    fn test_subword_limit() {
        let name = SpeciesName::with_limit("a b c d", 2);
        assert_eq!(name.subwords(), &["a".to_string(), "b".to_string()]);
        assert!(name.matches("a b"));
        assert!(!name.matches("c"));
        // Whole-name equality still works beyond the limit.
        assert!(name.matches("A B C D"));
    }

    #[test]
    fn test_catalog_add_reports_new_names() {
        let mut catalog = SpeciesCatalog::new();
        assert!(catalog.add_species("London planetree"));
        assert!(!catalog.add_species("London planetree"));
        // Stored as first seen; differently cased names are distinct entries.
        assert!(catalog.add_species("london planetree"));
        assert_eq!(catalog.number_of_species(), 2);
    }

    #[test]
    fn test_catalog_matching_is_deduplicated_and_sorted() {
        let mut catalog = SpeciesCatalog::new();
        for name in [
            "Japanese tree lilac",
            "red maple",
            "Norway maple",
            "maple",
            "Japanese tree lilac",
        ] {
            catalog.add_species(name);
        }

        assert_eq!(
            catalog.get_matching_species("maple"),
            vec!["Norway maple", "maple", "red maple"]
        );
        assert_eq!(
            catalog.get_matching_species("tree lilac"),
            vec!["Japanese tree lilac"]
        );
        assert!(catalog.get_matching_species("ginkgo").is_empty());
    }
}
