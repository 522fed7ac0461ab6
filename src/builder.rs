//! Collection builder
//!
//! Validates configuration and optionally bulk-loads a census file or reader
//! into a new collection.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use crate::census::{self, LoadSummary};
use crate::collection::TreeCollection;
use crate::config::Config;
use crate::error::{Result, SylvaError};

enum Source {
    None,
    Path(PathBuf),
    Reader(Box<dyn BufRead>),
}

/// Builder for a `TreeCollection` with custom configuration and census data.
pub struct CollectionBuilder {
    config: Config,
    source: Source,
}

impl std::fmt::Debug for CollectionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            Source::None => "none".to_string(),
            Source::Path(path) => path.display().to_string(),
            Source::Reader(_) => "reader".to_string(),
        };
        f.debug_struct("CollectionBuilder")
            .field("config", &self.config)
            .field("source", &source)
            .finish()
    }
}

impl CollectionBuilder {
    /// Create a builder for an empty collection with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            source: Source::None,
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Load census lines from a file when building.
    pub fn census_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source = Source::Path(path.into());
        self
    }

    /// Load census lines from a reader when building.
    pub fn census_reader<R: BufRead + 'static>(mut self, reader: R) -> Self {
        self.source = Source::Reader(Box::new(reader));
        self
    }

    /// Build the collection.
    pub fn build(self) -> Result<TreeCollection> {
        self.build_with_summary().map(|(collection, _)| collection)
    }

    /// Build the collection and report what the census load did.
    pub fn build_with_summary(self) -> Result<(TreeCollection, LoadSummary)> {
        self.config.validate().map_err(SylvaError::InvalidConfig)?;
        let mut collection = TreeCollection::with_config(self.config);

        let summary = match self.source {
            Source::None => LoadSummary::default(),
            Source::Path(path) => {
                let file = File::open(&path)?;
                census::load(BufReader::new(file), &mut collection)?
            }
            Source::Reader(reader) => census::load(reader, &mut collection)?,
        };
        Ok((collection, summary))
    }
}

impl Default for CollectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeCollection {
    pub fn builder() -> CollectionBuilder {
        CollectionBuilder::new()
    }
}
