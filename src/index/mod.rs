//! Ordered record index keyed on `(species, id)`.
//!
//! `TreeIndex` couples the AVL tree with a per-species tally so species
//! counts are O(1) and same-species lookups know when they are done.

pub mod avl;
pub mod level_order;

use rustc_hash::FxHashMap;

use crate::config::{Config, NameNormalization};
use crate::record::{RecordKey, TreeRecord};
use crate::spatial::within_radius;
use crate::species::eq_ignore_case;

pub use avl::{AvlTree, Iter, Node};
pub use level_order::{LevelOrder, collect_group};

/// Capitalises the first character if it is alphabetic, otherwise the second
/// one, leaving the rest untouched: "london planetree" becomes
/// "London planetree" and "'schubert' chokecherry" becomes
/// "'Schubert' chokecherry".
pub fn capitalize_first_alphabetic(name: &str) -> String {
    let mut chars = name.chars();
    let mut out = String::with_capacity(name.len());
    let Some(first) = chars.next() else {
        return out;
    };

    if first.is_alphabetic() {
        out.extend(first.to_uppercase());
    } else {
        out.push(first);
        if let Some(second) = chars.next() {
            if second.is_alphabetic() {
                out.extend(second.to_uppercase());
            } else {
                out.push(second);
            }
        }
    }
    out.push_str(chars.as_str());
    out
}

/// Number of indexed records per exact species name.
#[derive(Debug, Clone, Default)]
pub struct NameTally {
    counts: FxHashMap<String, usize>,
}

impl NameTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, name: &str) {
        match self.counts.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(name.to_string(), 1);
            }
        }
    }

    /// Decrements `name`, dropping the entry when it reaches zero. A name
    /// that is not tallied is left alone.
    pub fn decrement(&mut self, name: &str) {
        match self.counts.get_mut(name) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.counts.remove(name);
            }
            None => log::trace!("Ignoring decrement of untallied species '{}'", name),
        }
    }

    /// Count for exactly `name`.
    pub fn get(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Stored names that `query` refers to under `normalization`.
    pub fn resolve(&self, query: &str, normalization: NameNormalization) -> Vec<&str> {
        match normalization {
            NameNormalization::DatasetCasing => self.resolve_dataset_casing(query).into_iter().collect(),
            NameNormalization::IgnoreCase => self
                .counts
                .keys()
                .filter(|name| eq_ignore_case(name, query))
                .map(String::as_str)
                .collect(),
        }
    }

    fn resolve_dataset_casing(&self, query: &str) -> Option<&str> {
        if let Some((name, _)) = self.counts.get_key_value(query) {
            return Some(name.as_str());
        }
        let lower = query.to_lowercase();
        if let Some((name, _)) = self.counts.get_key_value(lower.as_str()) {
            return Some(name.as_str());
        }
        let capitalized = capitalize_first_alphabetic(&lower);
        if let Some((name, _)) = self.counts.get_key_value(capitalized.as_str()) {
            return Some(name.as_str());
        }
        // Last resort for casings the heuristic misses, e.g. "Norway Maple".
        // The smallest key keeps the pick stable across hash orders.
        self.counts
            .keys()
            .filter(|name| eq_ignore_case(name, query))
            .min()
            .map(String::as_str)
    }

    /// Total count of every stored name `query` resolves to.
    pub fn count(&self, query: &str, normalization: NameNormalization) -> usize {
        self.resolve(query, normalization)
            .into_iter()
            .map(|name| self.get(name))
            .sum()
    }
}

/// The balanced record index plus its species tally.
#[derive(Debug, Clone)]
pub struct TreeIndex {
    tree: AvlTree<TreeRecord>,
    tally: NameTally,
    normalization: NameNormalization,
    max_zipcode: u32,
    earth_radius_km: f64,
}

impl TreeIndex {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            tree: AvlTree::new(),
            tally: NameTally::new(),
            normalization: config.name_normalization,
            max_zipcode: config.max_zipcode,
            earth_radius_km: config.earth_radius_km,
        }
    }

    /// Inserts `record`; a record with the same `(species, id)` already in
    /// the index makes this a no-op returning `false`.
    pub fn insert(&mut self, record: TreeRecord) -> bool {
        let (species, id) = (record.species.clone(), record.id);
        let inserted = self.tree.insert(record);
        if inserted {
            self.tally.increment(&species);
        } else {
            log::debug!("Ignoring duplicate record key ('{}', {})", species, id);
        }
        inserted
    }

    /// Removes the record with `key`, if present.
    pub fn remove(&mut self, key: RecordKey<'_>) -> Option<TreeRecord> {
        let removed = self.tree.remove_by(|probe| key.cmp(&probe.key()))?;
        self.tally.decrement(&removed.species);
        Some(removed)
    }

    pub fn find(&self, key: RecordKey<'_>) -> Option<&TreeRecord> {
        self.tree.find_by(|probe| key.cmp(&probe.key()))
    }

    pub fn find_min(&self) -> Option<&TreeRecord> {
        self.tree.min()
    }

    pub fn find_max(&self) -> Option<&TreeRecord> {
        self.tree.max()
    }

    pub fn height(&self) -> i32 {
        self.tree.height()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Records in `(species, id)` order.
    pub fn iter(&self) -> Iter<'_, TreeRecord> {
        self.tree.iter()
    }

    pub fn tally(&self) -> &NameTally {
        &self.tally
    }

    pub fn tree(&self) -> &AvlTree<TreeRecord> {
        &self.tree
    }

    /// Number of records whose species name resolves from `name`.
    pub fn count_species(&self, name: &str) -> usize {
        self.tally.count(name, self.normalization)
    }

    /// Every record whose species is exactly `species`.
    ///
    /// Finds the highest node with that name, then walks its subtree
    /// breadth-first until the tallied number of records has been seen.
    pub fn records_of_species(&self, species: &str) -> Vec<&TreeRecord> {
        let expected = self.tally.get(species);
        if expected == 0 {
            return Vec::new();
        }
        match self
            .tree
            .find_node_by(|probe| species.cmp(probe.species.as_str()))
        {
            Some(start) => collect_group(start, expected, |record| record.species == species),
            None => Vec::new(),
        }
    }

    /// Like `records_of_species`, but resolves `name` with the configured
    /// normalization first.
    pub fn find_all_matches(&self, name: &str) -> Vec<&TreeRecord> {
        self.tally
            .resolve(name, self.normalization)
            .into_iter()
            .flat_map(|species| self.records_of_species(species))
            .collect()
    }

    /// Species names of every record in `zipcode`, in index order with
    /// duplicates. Empty for zipcodes above the configured maximum.
    pub fn all_in_zipcode(&self, zipcode: u32) -> Vec<&str> {
        if zipcode > self.max_zipcode {
            return Vec::new();
        }
        self.iter()
            .filter(|record| record.zipcode == zipcode)
            .map(|record| record.species.as_str())
            .collect()
    }

    /// Species names of every record at most `radius_km` from the given
    /// point, in index order with duplicates.
    pub fn all_nearby(&self, latitude: f64, longitude: f64, radius_km: f64) -> Vec<&str> {
        let center = geo::Point::new(longitude, latitude);
        self.iter()
            .filter(|record| {
                within_radius(&center, &record.location, radius_km, self.earth_radius_km)
            })
            .map(|record| record.species.as_str())
            .collect()
    }
}

impl Default for TreeIndex {
    fn default() -> Self {
        Self::new()
    }
}
