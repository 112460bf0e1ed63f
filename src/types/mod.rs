mod check;
mod checklist;
mod error;
mod operator;
mod outcome;
mod rule;
mod ruleset;
mod value;
mod wire;

pub use check::{key, Check, KeyCheck};
pub use checklist::Checklist;
pub use error::RulesetError;
pub use operator::{CompareOp, ListOp, Operator};
pub use outcome::Outcome;
pub use rule::Rule;
pub use ruleset::Ruleset;
pub use value::Value;
