//! Configuration for a tree collection.
//!
//! Every field has a default matching the 2015 NYC Street Tree Census, so
//! `Config::default()` is what most callers want.
use serde::de::Error;

use crate::spatial::EARTH_RADIUS_KM;

/// How a species name given to `count_species` is resolved against the
/// names stored in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NameNormalization {
    /// Try the name as given, then all-lowercase, then lowercase with the
    /// first alphabetic character capitalised (skipping one leading
    /// non-alphabetic character), and finally any stored name equal under
    /// case folding. Matches the census casing convention of
    /// "London planetree", "'Schubert' chokecherry".
    #[default]
    DatasetCasing,
    /// Fold case completely and sum every stored name that compares equal.
    IgnoreCase,
}

/// Collection configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub name_normalization: NameNormalization,

    /// Maximum number of whitespace/hyphen separated words kept per species
    /// name for matching.
    #[serde(default = "Config::default_max_subwords")]
    pub max_subwords: usize,

    /// Sphere radius for proximity queries, in kilometres.
    #[serde(default = "Config::default_earth_radius_km")]
    pub earth_radius_km: f64,

    /// Largest zipcode accepted by `all_in_zipcode`.
    #[serde(default = "Config::default_max_zipcode")]
    pub max_zipcode: u32,
}

impl Config {
    const fn default_max_subwords() -> usize {
        10
    }

    const fn default_earth_radius_km() -> f64 {
        EARTH_RADIUS_KM
    }

    const fn default_max_zipcode() -> u32 {
        99_999
    }

    pub fn with_name_normalization(mut self, normalization: NameNormalization) -> Self {
        self.name_normalization = normalization;
        self
    }

    pub fn with_max_subwords(mut self, max_subwords: usize) -> Self {
        assert!(max_subwords > 0, "Subword limit must be greater than zero");
        self.max_subwords = max_subwords;
        self
    }

    pub fn with_earth_radius_km(mut self, radius: f64) -> Self {
        assert!(
            radius.is_finite() && radius > 0.0,
            "Earth radius must be finite and positive"
        );
        self.earth_radius_km = radius;
        self
    }

    pub fn with_max_zipcode(mut self, max_zipcode: u32) -> Self {
        self.max_zipcode = max_zipcode;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_subwords == 0 {
            return Err("Subword limit must be greater than zero".to_string());
        }

        if !self.earth_radius_km.is_finite() {
            return Err("Earth radius must be finite (not NaN or infinity)".to_string());
        }
        if self.earth_radius_km <= 0.0 {
            return Err("Earth radius must be positive".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name_normalization: NameNormalization::default(),
            max_subwords: Self::default_max_subwords(),
            earth_radius_km: Self::default_earth_radius_km(),
            max_zipcode: Self::default_max_zipcode(),
        }
    }
}
