use thiserror::Error;

use crate::RulesetError;

/// Unified error type covering ruleset validation, JSON decoding, and I/O.
///
/// Returned by convenience loaders like
/// [`Ruleset::from_json()`](crate::Ruleset::from_json) and
/// [`StoreConfig::from_file()`](crate::StoreConfig::from_file).
#[derive(Debug, Error)]
pub enum FraudRulesError {
    #[error(transparent)]
    Ruleset(#[from] RulesetError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
