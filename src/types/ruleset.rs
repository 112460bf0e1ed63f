use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as Json;

use super::{RulesetError, Rule};
use crate::config::StoreConfig;
use crate::protection::ProtectionLevel;

/// An ordered list of rules, as persisted in store configuration and handed
/// to the risk backend.
///
/// Order is significant and preserved through every conversion.
///
/// # Example
///
/// ```
/// use fraud_rules::{key, Outcome, Rule, Ruleset};
///
/// let ruleset = Ruleset::new(vec![
///     Rule::with_outcome("order_items_threshold", Outcome::Review, key("item_count").greater_than(10))?,
/// ]);
/// let json = ruleset.to_json();
/// assert_eq!(Ruleset::from_json(&json)?, ruleset);
/// # Ok::<(), fraud_rules::FraudRulesError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ruleset {
    rules: Vec<Rule>,
}

impl Ruleset {
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Parse every rule of a JSON array, stopping at the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`RulesetError::NotAList`] if `json` is not an array, or
    /// [`RulesetError::InvalidRule`] naming the index of the first bad rule.
    pub fn from_array(json: &Json) -> Result<Self, RulesetError> {
        let items = json.as_array().ok_or(RulesetError::NotAList)?;
        let rules = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Rule::from_array(item).map_err(|source| RulesetError::InvalidRule {
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(rules = rules.len(), "loaded ruleset");
        Ok(Self { rules })
    }

    /// Non-failing probe sharing the exact validation path of
    /// [`from_array`](Self::from_array).
    #[must_use]
    pub fn validate_array(json: &Json) -> bool {
        match Ruleset::from_array(json) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(error = %err, "rejected ruleset array");
                false
            }
        }
    }

    /// Serialize as a JSON array of rule arrays.
    #[must_use]
    pub fn to_array(&self) -> Json {
        Json::Array(self.to_rule_arrays())
    }

    /// Serialize each rule, preserving order.
    #[must_use]
    pub fn to_rule_arrays(&self) -> Vec<Json> {
        self.rules.iter().map(Rule::to_array).collect()
    }

    /// Parse a JSON document holding a ruleset.
    ///
    /// # Errors
    ///
    /// Returns [`FraudRulesError`](crate::FraudRulesError) on malformed JSON
    /// or an invalid ruleset.
    pub fn from_json(input: &str) -> Result<Self, crate::FraudRulesError> {
        let json: Json = serde_json::from_str(input)?;
        Ok(Self::from_array(&json)?)
    }

    /// Compact JSON text, with fields in wire order.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_array().to_string()
    }

    /// Read a JSON file and parse the ruleset it contains.
    ///
    /// # Errors
    ///
    /// Returns [`FraudRulesError`](crate::FraudRulesError) on I/O, JSON, or
    /// validation failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::FraudRulesError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }

    /// Which protection level this ruleset corresponds to for `config`.
    #[must_use]
    pub fn matching_protection_level(&self, config: &StoreConfig) -> ProtectionLevel {
        crate::protection::get_matching_protection_level(&self.to_rule_arrays(), config)
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The first rule with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.key() == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl From<Vec<Rule>> for Ruleset {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}

impl FromIterator<Rule> for Ruleset {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Ruleset {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ruleset {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl Serialize for Ruleset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Ruleset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Ruleset::from_array(&json).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ruleset({} rules)", self.rules.len())
    }
}
