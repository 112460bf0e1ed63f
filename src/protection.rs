//! Canonical protection-level rulesets and classification of arbitrary
//! rulesets back into a level.
//!
//! Presets are derived fresh from the store configuration on every call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::config::StoreConfig;
use crate::{key, Check, Outcome, Rule, Ruleset, RulesetError};

pub const RULE_INTERNATIONAL_IP_ADDRESS: &str = "international_ip_address";
pub const RULE_ORDER_ITEMS_THRESHOLD: &str = "order_items_threshold";
pub const RULE_PURCHASE_PRICE_THRESHOLD: &str = "purchase_price_threshold";
pub const RULE_ADDRESS_MISMATCH: &str = "address_mismatch";
pub const RULE_INTERNATIONAL_BILLING_ADDRESS: &str = "international_billing_address";

/// Orders with more items than this are flagged.
pub const MAX_ITEM_COUNT: i64 = 10;
/// Under high protection, orders with fewer items than this are flagged too.
pub const MIN_ITEM_COUNT: i64 = 2;
/// Order total threshold in minor currency units.
pub const MAX_ORDER_TOTAL: i64 = 100_000;

/// Named fraud protection presets of increasing strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectionLevel {
    Basic,
    Standard,
    High,
    /// A ruleset matching none of the presets.
    Custom,
}

impl ProtectionLevel {
    /// The presets, in classification order.
    pub const PRESETS: [ProtectionLevel; 3] = [
        ProtectionLevel::Basic,
        ProtectionLevel::Standard,
        ProtectionLevel::High,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProtectionLevel::Basic => "basic",
            ProtectionLevel::Standard => "standard",
            ProtectionLevel::High => "high",
            ProtectionLevel::Custom => "custom",
        }
    }

    /// The canonical ruleset for this level. `Custom` has none.
    #[must_use]
    pub fn rules(self, config: &StoreConfig) -> Ruleset {
        match self {
            ProtectionLevel::Basic | ProtectionLevel::Custom => Ruleset::default(),
            ProtectionLevel::Standard => standard_rules(config),
            ProtectionLevel::High => high_rules(config),
        }
    }
}

impl FromStr for ProtectionLevel {
    type Err = RulesetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(ProtectionLevel::Basic),
            "standard" => Ok(ProtectionLevel::Standard),
            "high" => Ok(ProtectionLevel::High),
            "custom" => Ok(ProtectionLevel::Custom),
            other => Err(RulesetError::UnknownProtectionLevel {
                level: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ProtectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule arrays for basic protection: no rules.
#[must_use]
pub fn basic_protection_settings(config: &StoreConfig) -> Vec<Json> {
    ProtectionLevel::Basic.rules(config).to_rule_arrays()
}

/// Rule arrays for standard protection: three review rules.
#[must_use]
pub fn standard_protection_settings(config: &StoreConfig) -> Vec<Json> {
    ProtectionLevel::Standard.rules(config).to_rule_arrays()
}

/// Rule arrays for high protection: two block rules and three review rules.
#[must_use]
pub fn high_protection_settings(config: &StoreConfig) -> Vec<Json> {
    ProtectionLevel::High.rules(config).to_rule_arrays()
}

/// Classify `ruleset` by exact, order-sensitive comparison with each preset.
///
/// Anything that is not an exact match is [`ProtectionLevel::Custom`].
#[must_use]
pub fn get_matching_protection_level(ruleset: &[Json], config: &StoreConfig) -> ProtectionLevel {
    for level in ProtectionLevel::PRESETS {
        if level.rules(config).to_rule_arrays() == ruleset {
            tracing::debug!(level = %level, "ruleset matches protection preset");
            return level;
        }
    }
    tracing::debug!(rules = ruleset.len(), "ruleset matches no preset; treating as custom");
    ProtectionLevel::Custom
}

fn location_check(signal: &str, config: &StoreConfig) -> Check {
    Check::Leaf {
        key: signal.to_owned(),
        operator: config.selling_locations_operator(),
        value: config.selling_locations_value().into(),
    }
}

fn standard_rules(config: &StoreConfig) -> Ruleset {
    Ruleset::new(vec![
        Rule::from_parts(
            RULE_INTERNATIONAL_IP_ADDRESS,
            Outcome::Review,
            location_check("ip_country", config),
        ),
        Rule::from_parts(
            RULE_ORDER_ITEMS_THRESHOLD,
            Outcome::Review,
            key("item_count").greater_than(MAX_ITEM_COUNT),
        ),
        Rule::from_parts(
            RULE_PURCHASE_PRICE_THRESHOLD,
            Outcome::Review,
            key("order_total").greater_than(MAX_ORDER_TOTAL),
        ),
    ])
}

fn high_rules(config: &StoreConfig) -> Ruleset {
    Ruleset::new(vec![
        Rule::from_parts(
            RULE_INTERNATIONAL_IP_ADDRESS,
            Outcome::Block,
            location_check("ip_country", config),
        ),
        Rule::from_parts(
            RULE_PURCHASE_PRICE_THRESHOLD,
            Outcome::Block,
            key("order_total").greater_than(MAX_ORDER_TOTAL),
        ),
        Rule::from_parts(
            RULE_ORDER_ITEMS_THRESHOLD,
            Outcome::Review,
            key("item_count")
                .less_than(MIN_ITEM_COUNT)
                .or(key("item_count").greater_than(MAX_ITEM_COUNT)),
        ),
        Rule::from_parts(
            RULE_ADDRESS_MISMATCH,
            Outcome::Review,
            key("billing_shipping_address_same").equals(false),
        ),
        Rule::from_parts(
            RULE_INTERNATIONAL_BILLING_ADDRESS,
            Outcome::Review,
            location_check("billing_country", config),
        ),
    ])
}
