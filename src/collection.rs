//! The tree collection: record index, species catalog and borough counters
//! kept in step with each other.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::index::TreeIndex;
use crate::record::TreeRecord;
use crate::region::{Region, RegionTally};
use crate::report::TreeInfo;
use crate::species::SpeciesCatalog;

/// Query text that selects records without a species name.
pub const DEAD_OR_STUMP_QUERY: &str = " ";

/// Summary of a collection's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub record_count: usize,
    /// Distinct species names ever inserted. A name stays counted after its
    /// last record is removed.
    pub species_count: usize,
    pub index_height: i32,
    pub unclassified_count: usize,
}

#[derive(Debug, Clone)]
pub struct TreeCollection {
    index: TreeIndex,
    catalog: SpeciesCatalog,
    regions: RegionTally,
    config: Config,
}

impl TreeCollection {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            index: TreeIndex::with_config(&config),
            catalog: SpeciesCatalog::with_limit(config.max_subwords),
            regions: RegionTally::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    pub fn catalog(&self) -> &SpeciesCatalog {
        &self.catalog
    }

    pub fn regions(&self) -> &RegionTally {
        &self.regions
    }

    /// Adds `record`. Returns `false`, changing nothing, if a record with the
    /// same species and id is already present.
    pub fn insert(&mut self, record: TreeRecord) -> bool {
        let region = Region::classify(&record.borough);
        let species = record.species.clone();
        let unrecognised = region.is_none().then(|| (record.id, record.borough.clone()));
        if !self.index.insert(record) {
            return false;
        }

        if let Some((id, borough)) = unrecognised {
            log::warn!("Tree {} has unrecognised borough '{}'", id, borough);
        }
        self.catalog.add_species(&species);
        self.regions.record(region);
        true
    }

    /// Removes the record with the same species and id as `record`.
    ///
    /// Counters only change when something was removed. The species name
    /// stays in the catalog.
    pub fn remove(&mut self, record: &TreeRecord) -> Option<TreeRecord> {
        let removed = self.index.remove(record.key())?;
        self.regions.forget(Region::classify(&removed.borough));
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn total_tree_count(&self) -> usize {
        self.regions.total()
    }

    /// Records in the named borough; 0 for names that are not a borough.
    pub fn count_of_trees_in_boro(&self, borough: &str) -> usize {
        Region::classify(borough)
            .map(|region| self.regions.get(region))
            .unwrap_or(0)
    }

    pub fn region_count(&self, region: Region) -> usize {
        self.regions.get(region)
    }

    pub fn unclassified_count(&self) -> usize {
        self.regions.unclassified()
    }

    /// Records whose species is `name`, after case normalization.
    pub fn count_species(&self, name: &str) -> usize {
        self.index.count_species(name)
    }

    /// Records whose species is any catalog name that `partial_name` matches.
    pub fn count_matching_species(&self, partial_name: &str) -> usize {
        self.catalog
            .get_matching_species(partial_name)
            .iter()
            .map(|name| self.index.tally().get(name))
            .sum()
    }

    pub fn get_matching_species(&self, partial_name: &str) -> Vec<String> {
        self.catalog.get_matching_species(partial_name)
    }

    pub fn species_names(&self) -> Vec<&str> {
        self.catalog.names().collect()
    }

    pub fn number_of_species(&self) -> usize {
        self.catalog.number_of_species()
    }

    pub fn find_all_matches(&self, name: &str) -> Vec<&TreeRecord> {
        self.index.find_all_matches(name)
    }

    /// Species of the records in `zipcode`, duplicates included.
    pub fn all_in_zipcode(&self, zipcode: u32) -> Vec<&str> {
        self.index.all_in_zipcode(zipcode)
    }

    /// Species of the records within `radius_km` of the point, boundary
    /// included.
    pub fn all_nearby(&self, latitude: f64, longitude: f64, radius_km: f64) -> Vec<&str> {
        self.index.all_nearby(latitude, longitude, radius_km)
    }

    /// Frequency report for every species `partial_name` matches.
    ///
    /// A blank query (empty or all whitespace, such as
    /// `DEAD_OR_STUMP_QUERY`) reports on records with no species. Returns
    /// `None` when no catalog name matches. Names stay in the catalog after
    /// their last record is removed, so such a name still yields a report,
    /// with zero matches.
    pub fn tree_info(&self, partial_name: &str) -> Option<TreeInfo> {
        let dead_or_stump = partial_name.trim().is_empty();
        let species = if dead_or_stump {
            vec![String::new()]
        } else {
            self.catalog.get_matching_species(partial_name)
        };
        if species.is_empty() {
            return None;
        }

        let mut matched = RegionTally::new();
        for name in &species {
            for record in self.index.records_of_species(name) {
                matched.record(Region::classify(&record.borough));
            }
        }
        Some(TreeInfo::new(
            partial_name,
            dead_or_stump,
            species,
            &matched,
            &self.regions,
        ))
    }

    pub fn stats(&self) -> CollectionStats {
        CollectionStats {
            record_count: self.len(),
            species_count: self.number_of_species(),
            index_height: self.index.height(),
            unclassified_count: self.unclassified_count(),
        }
    }
}

impl Default for TreeCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<TreeRecord> for TreeCollection {
    fn extend<I: IntoIterator<Item = TreeRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}
