//! In-memory index over a street tree census, with fuzzy species lookup,
//! borough frequency reports and proximity search.
//!
//! ```rust
//! use sylva::{TreeCollection, TreeRecord};
//!
//! let mut trees = TreeCollection::new();
//! trees.insert(TreeRecord::new(1, "Oak").with_zipcode(10001).with_borough("Manhattan"));
//! trees.insert(TreeRecord::new(2, "Oak").with_zipcode(10001).with_borough("Queens"));
//! trees.insert(TreeRecord::new(3, "Pine").with_zipcode(20002).with_borough("Queens"));
//!
//! assert_eq!(trees.count_species("oak"), 2);
//! assert_eq!(trees.all_in_zipcode(10001), vec!["Oak", "Oak"]);
//! assert_eq!(trees.count_of_trees_in_boro("Queens"), 2);
//! ```

pub mod builder;
pub mod census;
pub mod collection;
pub mod command;
pub mod config;
pub mod error;
pub mod index;
pub mod record;
pub mod region;
pub mod report;
pub mod spatial;
pub mod species;

pub use builder::CollectionBuilder;
pub use census::LoadSummary;
pub use collection::{CollectionStats, TreeCollection};
pub use command::Command;
pub use config::{Config, NameNormalization};
pub use error::{Result, SylvaError};
pub use index::{AvlTree, NameTally, TreeIndex};
pub use record::{RecordKey, TreeHealth, TreeRecord, TreeStatus};
pub use region::{Region, RegionTally};
pub use report::{RegionFrequency, TreeInfo};
pub use species::{SpeciesCatalog, SpeciesName};

pub use geo::Point;

pub use spatial::{EARTH_RADIUS_KM, distance_between, distance_km};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{CollectionBuilder, Command, Result, SylvaError, TreeCollection};

    pub use crate::{Config, NameNormalization};

    pub use crate::{Region, TreeRecord};

    pub use crate::spatial::distance_km;

    pub use geo::Point;
}
