//! Census records and their ordering key.

use geo::Point;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Living status of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TreeStatus {
    Alive,
    Dead,
    Stump,
    /// Missing or unrecognised in the source data.
    #[default]
    Unknown,
}

impl TreeStatus {
    /// Lenient conversion from census text; anything unrecognised is `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "alive" => TreeStatus::Alive,
            "dead" => TreeStatus::Dead,
            "stump" => TreeStatus::Stump,
            _ => TreeStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TreeStatus::Alive => "Alive",
            TreeStatus::Dead => "Dead",
            TreeStatus::Stump => "Stump",
            TreeStatus::Unknown => "",
        }
    }
}

/// Observed condition of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TreeHealth {
    Good,
    Fair,
    Poor,
    #[default]
    Unknown,
}

impl TreeHealth {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "good" => TreeHealth::Good,
            "fair" => TreeHealth::Fair,
            "poor" => TreeHealth::Poor,
            _ => TreeHealth::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TreeHealth::Good => "Good",
            TreeHealth::Fair => "Fair",
            TreeHealth::Poor => "Poor",
            TreeHealth::Unknown => "",
        }
    }
}

/// Ordering key of a record: species name first, then id.
///
/// Field order matters, the derived `Ord` is lexicographic over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey<'a> {
    pub species: &'a str,
    pub id: u32,
}

impl<'a> RecordKey<'a> {
    pub fn new(species: &'a str, id: u32) -> Self {
        Self { species, id }
    }
}

/// A single tree from the census.
///
/// Equality and ordering only look at `(species, id)`; every other field is
/// payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeRecord {
    pub id: u32,
    pub diameter: u32,
    pub status: TreeStatus,
    pub health: TreeHealth,
    /// Common species name, empty for dead trees and stumps.
    pub species: String,
    pub address: String,
    /// Borough name as it appears in the source data.
    pub borough: String,
    pub zipcode: u32,
    /// `x` is longitude, `y` is latitude.
    pub location: Point,
}

impl TreeRecord {
    /// Creates a record with only the fields that participate in lookups;
    /// the rest take their defaults.
    pub fn new(id: u32, species: impl Into<String>) -> Self {
        Self {
            id,
            diameter: 0,
            status: TreeStatus::Unknown,
            health: TreeHealth::Unknown,
            species: species.into(),
            address: String::new(),
            borough: String::new(),
            zipcode: 0,
            location: Point::new(0.0, 0.0),
        }
    }

    pub fn with_diameter(mut self, diameter: u32) -> Self {
        self.diameter = diameter;
        self
    }

    pub fn with_status(mut self, status: TreeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_health(mut self, health: TreeHealth) -> Self {
        self.health = health;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_borough(mut self, borough: impl Into<String>) -> Self {
        self.borough = borough.into();
        self
    }

    pub fn with_zipcode(mut self, zipcode: u32) -> Self {
        self.zipcode = zipcode;
        self
    }

    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Point::new(longitude, latitude);
        self
    }

    pub fn key(&self) -> RecordKey<'_> {
        RecordKey::new(&self.species, self.id)
    }

    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }

    pub fn same_species(&self, other: &TreeRecord) -> bool {
        self.species == other.species
    }
}

impl PartialEq for TreeRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for TreeRecord {}

impl PartialOrd for TreeRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TreeRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for TreeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}, {}, {:05}, {}, {}",
            self.species,
            self.id,
            self.diameter,
            self.status.as_str(),
            self.health.as_str(),
            self.address,
            self.borough,
            self.zipcode,
            self.latitude(),
            self.longitude()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_by_species_then_id() {
        let a = TreeRecord::new(7, "Ash");
        let b = TreeRecord::new(2, "Oak");
        let c = TreeRecord::new(9, "Oak");

        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn test_equality_ignores_payload() {
        let a = TreeRecord::new(1, "Oak").with_zipcode(10001).with_diameter(12);
        let b = TreeRecord::new(1, "Oak").with_borough("Queens");
        assert_eq!(a, b);
        assert_ne!(a, TreeRecord::new(1, "Pine"));
        assert_ne!(a, TreeRecord::new(2, "Oak"));
    }

    #[test]
    fn test_empty_species_sorts_first() {
        let stump = TreeRecord::new(500, "");
        let ash = TreeRecord::new(1, "Ash");
        assert!(stump < ash);
    }

    #[test]
    fn test_position_accessors() {
        let record = TreeRecord::new(1, "Oak").with_position(40.7, -73.9);
        assert_eq!(record.latitude(), 40.7);
        assert_eq!(record.longitude(), -73.9);
    }

    #[test]
    fn test_vocabulary_parsing() {
        assert_eq!(TreeStatus::parse("Alive"), TreeStatus::Alive);
        assert_eq!(TreeStatus::parse("stump"), TreeStatus::Stump);
        assert_eq!(TreeStatus::parse(""), TreeStatus::Unknown);
        assert_eq!(TreeHealth::parse("Fair"), TreeHealth::Fair);
        assert_eq!(TreeHealth::parse("Excellent"), TreeHealth::Unknown);
    }

    #[test]
    fn test_display_pads_zipcode() {
        let record = TreeRecord::new(3, "Pine").with_zipcode(501);
        assert!(record.to_string().contains(", 00501, "));
    }
}
