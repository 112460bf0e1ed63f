//! Store configuration consumed by the protection-level presets.

use serde::{Deserialize, Serialize};

use crate::CompareOp;

/// Which countries the store sells to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedCountries {
    #[default]
    All,
    AllExcept,
    Specific,
}

/// The selling-location settings of a store.
///
/// Field names follow the store options they are read from, so a JSON dump
/// of those options deserializes directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub allowed_countries: AllowedCountries,
    pub all_except_countries: Vec<String>,
    pub specific_allowed_countries: Vec<String>,
}

impl StoreConfig {
    /// A store selling everywhere.
    #[must_use]
    pub fn all_countries() -> Self {
        Self::default()
    }

    /// A store selling everywhere except `countries`.
    #[must_use]
    pub fn all_except<I, S>(countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_countries: AllowedCountries::AllExcept,
            all_except_countries: countries.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// A store selling only to `countries`.
    #[must_use]
    pub fn specific<I, S>(countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_countries: AllowedCountries::Specific,
            specific_allowed_countries: countries.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse configuration from JSON text. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn from_json(input: &str) -> Result<Self, crate::FraudRulesError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::FraudRulesError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }

    /// Operator for location checks: the rule fires when the signal falls
    /// outside the selling area.
    #[must_use]
    pub fn selling_locations_operator(&self) -> CompareOp {
        match self.allowed_countries {
            AllowedCountries::All | AllowedCountries::AllExcept => CompareOp::In,
            AllowedCountries::Specific => CompareOp::NotIn,
        }
    }

    /// Operand for location checks: empty when selling everywhere, otherwise
    /// the configured codes lower-cased and joined with `|`.
    #[must_use]
    pub fn selling_locations_value(&self) -> String {
        let countries = match self.allowed_countries {
            AllowedCountries::All => return String::new(),
            AllowedCountries::AllExcept => &self.all_except_countries,
            AllowedCountries::Specific => &self.specific_allowed_countries,
        };
        countries
            .iter()
            .map(|c| c.to_lowercase())
            .collect::<Vec<_>>()
            .join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sells_everywhere() {
        let config = StoreConfig::default();
        assert_eq!(config.allowed_countries, AllowedCountries::All);
        assert_eq!(config.selling_locations_operator(), CompareOp::In);
        assert_eq!(config.selling_locations_value(), "");
    }

    #[test]
    fn all_ignores_stale_country_lists() {
        let config = StoreConfig {
            specific_allowed_countries: vec!["US".into()],
            ..StoreConfig::all_countries()
        };
        assert_eq!(config.selling_locations_value(), "");
    }

    #[test]
    fn all_except_lists_excluded_countries() {
        let config = StoreConfig::all_except(["RU", "BY"]);
        assert_eq!(config.selling_locations_operator(), CompareOp::In);
        assert_eq!(config.selling_locations_value(), "ru|by");
    }

    #[test]
    fn specific_lists_allowed_countries() {
        let config = StoreConfig::specific(["US", "CA", "MX"]);
        assert_eq!(config.selling_locations_operator(), CompareOp::NotIn);
        assert_eq!(config.selling_locations_value(), "us|ca|mx");
    }

    #[test]
    fn from_json_with_defaults() {
        let config = StoreConfig::from_json(r#"{"allowed_countries":"specific","specific_allowed_countries":["GB"]}"#)
            .unwrap();
        assert_eq!(config, StoreConfig::specific(["GB"]));

        let empty = StoreConfig::from_json("{}").unwrap();
        assert_eq!(empty, StoreConfig::all_countries());
    }

    #[test]
    fn from_json_rejects_unknown_mode() {
        assert!(StoreConfig::from_json(r#"{"allowed_countries":"nowhere"}"#).is_err());
    }
}
