//! Administrative regions (the five NYC boroughs) and per-region counters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of counter slots: the city-wide total plus one per borough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    All = 0,
    Manhattan,
    Bronx,
    Brooklyn,
    Queens,
    StatenIsland,
}

impl Region {
    /// The five boroughs in report order, without `All`.
    pub const BOROUGHS: [Region; 5] = [
        Region::Manhattan,
        Region::Bronx,
        Region::Brooklyn,
        Region::Queens,
        Region::StatenIsland,
    ];

    const SLOTS: usize = 6;

    /// Classifies a borough name from the census into a borough slot.
    ///
    /// Comparison is on the whole trimmed name, ignoring ASCII case. "The Bronx"
    /// and "Staten" are accepted as aliases. Anything else is `None`; the
    /// caller counts it city-wide only. Never returns `Region::All`.
    pub fn classify(name: &str) -> Option<Region> {
        match name.trim().to_ascii_lowercase().as_str() {
            "manhattan" => Some(Region::Manhattan),
            "bronx" | "the bronx" => Some(Region::Bronx),
            "brooklyn" => Some(Region::Brooklyn),
            "queens" => Some(Region::Queens),
            "staten island" | "staten" => Some(Region::StatenIsland),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Region::All => "NYC",
            Region::Manhattan => "Manhattan",
            Region::Bronx => "Bronx",
            Region::Brooklyn => "Brooklyn",
            Region::Queens => "Queens",
            Region::StatenIsland => "Staten Island",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-region record counters.
///
/// `Region::All` counts every record, including ones whose borough could not
/// be classified; those are also tracked in `unclassified`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTally {
    counts: [usize; Region::SLOTS],
    unclassified: usize,
}

impl RegionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one record in `region` (if any) and in the city-wide total.
    pub fn record(&mut self, region: Option<Region>) {
        self.counts[Region::All.slot()] += 1;
        match region {
            Some(Region::All) | None => self.unclassified += 1,
            Some(borough) => self.counts[borough.slot()] += 1,
        }
    }

    /// Reverses `record`. Counters never go below zero.
    pub fn forget(&mut self, region: Option<Region>) {
        let total = &mut self.counts[Region::All.slot()];
        *total = total.saturating_sub(1);
        match region {
            Some(Region::All) | None => self.unclassified = self.unclassified.saturating_sub(1),
            Some(borough) => {
                let count = &mut self.counts[borough.slot()];
                *count = count.saturating_sub(1);
            }
        }
    }

    pub fn get(&self, region: Region) -> usize {
        self.counts[region.slot()]
    }

    pub fn total(&self) -> usize {
        self.get(Region::All)
    }

    pub fn unclassified(&self) -> usize {
        self.unclassified
    }
}
