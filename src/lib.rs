mod config;
mod error;
pub mod protection;
mod types;

pub use config::{AllowedCountries, StoreConfig};
pub use error::FraudRulesError;
pub use protection::{
    basic_protection_settings, get_matching_protection_level, high_protection_settings,
    standard_protection_settings, ProtectionLevel,
};
pub use types::{
    key, Check, Checklist, CompareOp, KeyCheck, ListOp, Operator, Outcome, Rule, Ruleset,
    RulesetError, Value,
};
