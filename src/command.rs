//! Query commands read from a command file, one per line.
//!
//! ```text
//! tree_info <species name...>
//! listall_names
//! list_near <latitude> <longitude> <distance_km>
//! listall_inzip <zipcode>
//! ```

use std::str::FromStr;

use crate::collection::{DEAD_OR_STUMP_QUERY, TreeCollection};
use crate::error::{Result, SylvaError};
use crate::report;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Species frequency report. A name of a single space asks about records
    /// with no species.
    TreeInfo(String),
    ListAllNames,
    ListNear {
        latitude: f64,
        longitude: f64,
        distance_km: f64,
    },
    ListAllInZip(u32),
}

fn parse_arg<T: FromStr>(verb: &str, name: &str, value: Option<&str>) -> Result<T> {
    let value =
        value.ok_or_else(|| SylvaError::InvalidCommand(format!("{} is missing {}", verb, name)))?;
    value.parse().map_err(|_| {
        SylvaError::InvalidCommand(format!("{}: '{}' is not a valid {}", verb, value, name))
    })
}

impl Command {
    /// Parses one command line. Blank lines and `#` comments are `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (trimmed, ""),
        };
        let mut args = rest.split_whitespace();

        let command = match verb {
            // A missing name is the dead-tree query.
            "tree_info" if rest.is_empty() => Command::TreeInfo(DEAD_OR_STUMP_QUERY.to_string()),
            "tree_info" => Command::TreeInfo(rest.to_string()),
            "listall_names" => Command::ListAllNames,
            "list_near" => Command::ListNear {
                latitude: parse_arg(verb, "latitude", args.next())?,
                longitude: parse_arg(verb, "longitude", args.next())?,
                distance_km: parse_arg(verb, "distance", args.next())?,
            },
            "listall_inzip" => Command::ListAllInZip(parse_arg(verb, "zipcode", args.next())?),
            other => {
                return Err(SylvaError::InvalidCommand(format!(
                    "unknown command '{}'",
                    other
                )));
            }
        };

        if !matches!(command, Command::TreeInfo(_)) && args.next().is_some() {
            return Err(SylvaError::InvalidCommand(format!(
                "too many arguments for {}",
                verb
            )));
        }
        Ok(Some(command))
    }

    /// Runs the command and renders its report.
    pub fn execute(&self, collection: &TreeCollection) -> String {
        match self {
            Command::TreeInfo(name) => match collection.tree_info(name) {
                Some(info) => info.to_string(),
                None => format!("No {} trees were found.\n", name),
            },
            Command::ListAllNames => report::names_listing(collection.catalog().names()),
            Command::ListNear {
                latitude,
                longitude,
                distance_km,
            } => {
                let names = collection.all_nearby(*latitude, *longitude, *distance_km);
                report::nearby_listing(*latitude, *longitude, *distance_km, &names)
            }
            Command::ListAllInZip(zipcode) => {
                let names = collection.all_in_zipcode(*zipcode);
                report::zipcode_listing(*zipcode, &names)
            }
        }
    }
}

impl FromStr for Command {
    type Err = SylvaError;

    fn from_str(s: &str) -> Result<Self> {
        Command::parse(s)?.ok_or_else(|| SylvaError::InvalidCommand("empty command".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TreeRecord;

    #[test]
    fn test_parse_verbs() {
        assert_eq!(
            Command::parse("tree_info Japanese tree lilac").unwrap(),
            Some(Command::TreeInfo("Japanese tree lilac".into()))
        );
        assert_eq!(
            Command::parse("listall_names").unwrap(),
            Some(Command::ListAllNames)
        );
        assert_eq!(
            Command::parse("list_near 40.75 -73.99 0.5").unwrap(),
            Some(Command::ListNear {
                latitude: 40.75,
                longitude: -73.99,
                distance_km: 0.5
            })
        );
        assert_eq!(
            Command::parse("  listall_inzip 10001\r\n").unwrap(),
            Some(Command::ListAllInZip(10001))
        );
    }

    #[test]
    fn test_parse_blank_tree_info_is_dead_query() {
        assert_eq!(
            Command::parse("tree_info  ").unwrap(),
            Some(Command::TreeInfo(" ".into()))
        );
        assert_eq!(
            Command::parse("tree_info").unwrap(),
            Some(Command::TreeInfo(" ".into()))
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# listall_names").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::parse("plant_tree oak"),
            Err(SylvaError::InvalidCommand(_))
        ));
        assert!(Command::parse("list_near 40.75 -73.99").is_err());
        assert!(Command::parse("list_near north -73.99 1").is_err());
        assert!(Command::parse("listall_inzip -5").is_err());
        assert!(Command::parse("listall_names now").is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn test_execute() {
        let mut trees = TreeCollection::new();
        trees.insert(TreeRecord::new(1, "Oak").with_zipcode(10001).with_borough("Manhattan"));
        trees.insert(TreeRecord::new(2, "Oak").with_zipcode(10001).with_borough("Manhattan"));

        let out = Command::ListAllInZip(10001).execute(&trees);
        assert_eq!(out, "Trees found in zipcode 10001:\nOak: 2\n");
        assert_eq!(Command::ListAllNames.execute(&trees), "Oak\n");
        assert_eq!(
            Command::TreeInfo("ginkgo".into()).execute(&trees),
            "No ginkgo trees were found.\n"
        );
        assert!(Command::TreeInfo("oak".into()).execute(&trees).contains("100.00%"));
    }
}
