//! Query reports: species frequency by borough and name listings.
//!
//! These types only format data the collection already computed; they never
//! touch the index themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::region::{Region, RegionTally};

/// Label used for records whose species name is empty.
pub const UNKNOWN_SPECIES: &str = "Unknown";

/// Run-length counts of adjacent equal names.
///
/// Names coming out of the index are in key order, so equal names are
/// already adjacent and this yields one entry per distinct name.
pub fn count_duplicates(names: &[&str]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for name in names {
        match counts.last_mut() {
            Some((last, count)) if last.as_str() == *name => *count += 1,
            _ => counts.push((name.to_string(), 1)),
        }
    }
    counts
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { UNKNOWN_SPECIES } else { name }
}

fn write_counts(out: &mut String, names: &[&str]) {
    for (name, count) in count_duplicates(names) {
        out.push_str(&format!("{}: {}\n", display_name(&name), count));
    }
}

/// Lists species found in `zipcode`, one line per name with its count.
pub fn zipcode_listing(zipcode: u32, names: &[&str]) -> String {
    if names.is_empty() {
        return format!("No trees found in zipcode: {:05}\n", zipcode);
    }
    let mut out = format!("Trees found in zipcode {:05}:\n", zipcode);
    write_counts(&mut out, names);
    out
}

/// Lists species found within `radius_km` of a point.
pub fn nearby_listing(latitude: f64, longitude: f64, radius_km: f64, names: &[&str]) -> String {
    let place = format!("{} kilometers of {} and {}", radius_km, latitude, longitude);
    if names.is_empty() {
        return format!("No trees found within {}\n", place);
    }
    let mut out = format!("Trees found within {}:\n", place);
    write_counts(&mut out, names);
    out
}

/// Every species name in the catalog, one per line.
pub fn names_listing<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for name in names {
        out.push_str(name);
        out.push('\n');
    }
    out
}

/// Matched records in one region against all records in that region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionFrequency {
    pub matched: usize,
    pub total: usize,
    /// `matched / total * 100`, or 0 when the region has no records.
    pub percent: f64,
}

impl RegionFrequency {
    pub fn new(matched: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            matched as f64 / total as f64 * 100.0
        };
        Self {
            matched,
            total,
            percent,
        }
    }
}

/// Result of a `tree_info` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeInfo {
    pub query: String,
    /// Set for the blank query, which selects records without a species.
    pub dead_or_stump: bool,
    /// Catalog names the query resolved to.
    pub species: Vec<String>,
    pub city: RegionFrequency,
    pub boroughs: Vec<(Region, RegionFrequency)>,
}

impl TreeInfo {
    /// Builds the report from the counts of matched records and the
    /// collection-wide counts, per region.
    pub fn new(
        query: impl Into<String>,
        dead_or_stump: bool,
        species: Vec<String>,
        matched: &RegionTally,
        totals: &RegionTally,
    ) -> Self {
        let boroughs = Region::BOROUGHS
            .iter()
            .map(|&region| {
                (
                    region,
                    RegionFrequency::new(matched.get(region), totals.get(region)),
                )
            })
            .collect();
        Self {
            query: query.into(),
            dead_or_stump,
            species,
            city: RegionFrequency::new(matched.total(), totals.total()),
            boroughs,
        }
    }

    pub fn frequency(&self, region: Region) -> RegionFrequency {
        if region == Region::All {
            return self.city;
        }
        self.boroughs
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, f)| *f)
            .unwrap_or_else(|| RegionFrequency::new(0, 0))
    }

    /// Number of matched records city-wide.
    pub fn matched(&self) -> usize {
        self.city.matched
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, label: &str, freq: &RegionFrequency) -> fmt::Result {
    writeln!(
        f,
        "{:<15}{:>10} ({}){:>15.2}%",
        label, freq.matched, freq.total, freq.percent
    )
}

impl fmt::Display for TreeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dead_or_stump {
            writeln!(f, "{}", UNKNOWN_SPECIES)?;
            writeln!(f, "All dead trees or stumps:")?;
        } else {
            writeln!(f, "{}", self.query)?;
            writeln!(f, "All matching species:")?;
            for name in &self.species {
                writeln!(f, "{}", name)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Frequency by borough:")?;
        write_row(f, "Total in NYC:", &self.city)?;
        for (region, freq) in &self.boroughs {
            write_row(f, &format!("{}:", region.name()), freq)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_duplicates_runs() {
        assert_eq!(
            count_duplicates(&["", "", "Oak", "Oak", "Oak", "Pine"]),
            vec![
                (String::new(), 2),
                ("Oak".to_string(), 3),
                ("Pine".to_string(), 1)
            ]
        );
        assert!(count_duplicates(&[]).is_empty());
    }

    #[test]
    fn test_zipcode_listing() {
        assert_eq!(
            zipcode_listing(10001, &["", "Oak", "Oak"]),
            "Trees found in zipcode 10001:\nUnknown: 1\nOak: 2\n"
        );
        assert_eq!(zipcode_listing(501, &[]), "No trees found in zipcode: 00501\n");
    }

    #[test]
    fn test_nearby_listing() {
        assert_eq!(
            nearby_listing(40.5, -73.25, 0.5, &["Elm"]),
            "Trees found within 0.5 kilometers of 40.5 and -73.25:\nElm: 1\n"
        );
        assert!(nearby_listing(40.5, -73.25, 0.5, &[]).starts_with("No trees found within"));
    }

    #[test]
    fn test_frequency_guards_empty_region() {
        let freq = RegionFrequency::new(0, 0);
        assert_eq!(freq.percent, 0.0);
        let freq = RegionFrequency::new(1, 4);
        assert!((freq.percent - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_tree_info_frequencies() {
        let mut totals = RegionTally::new();
        let mut matched = RegionTally::new();
        for _ in 0..4 {
            totals.record(Some(Region::Queens));
        }
        totals.record(None);
        matched.record(Some(Region::Queens));

        let info = TreeInfo::new("oak", false, vec!["Oak".into()], &matched, &totals);
        assert_eq!(info.matched(), 1);
        assert_eq!(info.frequency(Region::All), RegionFrequency::new(1, 5));
        assert!((info.frequency(Region::Queens).percent - 25.0).abs() < 1e-12);
        assert_eq!(info.frequency(Region::Bronx).percent, 0.0);

        let text = info.to_string();
        assert!(text.starts_with("oak\nAll matching species:\nOak\n\nFrequency by borough:\n"));
        assert!(text.contains("Staten Island:"));
        assert!(text.contains("25.00%"));
    }

    #[test]
    fn test_tree_info_dead_banner() {
        let info = TreeInfo::new(" ", true, vec![String::new()], &RegionTally::new(), &RegionTally::new());
        assert!(info.to_string().starts_with("Unknown\nAll dead trees or stumps:\n"));
    }
}
