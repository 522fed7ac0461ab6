//! Reader for the 2015 NYC Street Tree Census CSV export.
//!
//! Only the columns the collection uses are read; the rest are skipped.
//! Columns are numbered from 1 as in the census data dictionary.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::collection::TreeCollection;
use crate::error::{Result, SylvaError};
use crate::record::{TreeHealth, TreeRecord, TreeStatus};

const COL_ID: usize = 1;
const COL_DIAMETER: usize = 4;
const COL_STATUS: usize = 7;
const COL_HEALTH: usize = 8;
const COL_SPECIES: usize = 10;
const COL_ADDRESS: usize = 25;
const COL_ZIPCODE: usize = 26;
const COL_BOROUGH: usize = 30;
const COL_LATITUDE: usize = 38;
const COL_LONGITUDE: usize = 39;

/// First field of the header row.
const HEADER_FIRST_FIELD: &str = "tree_id";

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Data lines read, excluding the header and blank lines.
    pub lines: usize,
    pub inserted: usize,
    /// Lines whose key was already present.
    pub duplicates: usize,
    /// Lines that could not be parsed.
    pub skipped: usize,
}

fn starts_with_digit(field: &str) -> bool {
    field.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn number<T: std::str::FromStr + Default>(field: Option<&str>) -> T {
    field
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_default()
}

/// Parses one census line into a record.
///
/// The field before the address can itself contain commas. If column 25
/// does not start with a digit, fragments are consumed until one does, and
/// every later column shifts by the number of extra fragments. Unparsable
/// numbers become 0 and missing text fields become empty.
pub fn parse_line(line: &str) -> Result<TreeRecord> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(SylvaError::InvalidInput("empty census line".to_string()));
    }

    let fields: Vec<&str> = line.split(',').collect();
    let at = |column: usize| fields.get(column - 1).copied();

    let mut shift = 0;
    while let Some(field) = at(COL_ADDRESS + shift) {
        if starts_with_digit(field) {
            break;
        }
        shift += 1;
    }
    let address = if at(COL_ADDRESS + shift).is_some() {
        at(COL_ADDRESS + shift)
    } else {
        shift = 0;
        at(COL_ADDRESS)
    };
    let shifted = |column: usize| at(column + shift);

    let id_field = at(COL_ID).unwrap_or_default().trim();
    let id = id_field
        .parse()
        .map_err(|_| SylvaError::InvalidInput(format!("bad tree id '{}'", id_field)))?;

    let latitude: f64 = number(shifted(COL_LATITUDE));
    let longitude: f64 = number(shifted(COL_LONGITUDE));

    Ok(TreeRecord::new(id, at(COL_SPECIES).unwrap_or_default())
        .with_diameter(number(at(COL_DIAMETER)))
        .with_status(TreeStatus::parse(at(COL_STATUS).unwrap_or_default()))
        .with_health(TreeHealth::parse(at(COL_HEALTH).unwrap_or_default()))
        .with_address(address.unwrap_or_default())
        .with_zipcode(number(shifted(COL_ZIPCODE)))
        .with_borough(shifted(COL_BOROUGH).unwrap_or_default())
        .with_position(latitude, longitude))
}

fn is_header(line: &str) -> bool {
    line.split(',')
        .next()
        .is_some_and(|first| first.trim() == HEADER_FIRST_FIELD)
}

/// Reads every line of `reader` into `collection`, in order.
///
/// The header row and blank lines are ignored. Lines that fail to parse are
/// logged and counted, not fatal; read errors are.
pub fn load<R: BufRead>(reader: R, collection: &mut TreeCollection) -> Result<LoadSummary> {
    let mut summary = LoadSummary::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || is_header(&line) {
            continue;
        }
        summary.lines += 1;

        match parse_line(&line) {
            Ok(record) => {
                if collection.insert(record) {
                    summary.inserted += 1;
                } else {
                    summary.duplicates += 1;
                }
            }
            Err(e) => {
                log::warn!("Skipping census line {}: {}", line_no + 1, e);
                summary.skipped += 1;
            }
        }
    }

    log::debug!(
        "Loaded {} records from {} lines ({} duplicates, {} skipped)",
        summary.inserted,
        summary.lines,
        summary.duplicates,
        summary.skipped
    );
    Ok(summary)
}
