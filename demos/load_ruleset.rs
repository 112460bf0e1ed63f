use fraud_rules::{Ruleset, StoreConfig};
use tracing_subscriber::EnvFilter;

const STORE: &str = r#"{"allowed_countries": "all_except", "all_except_countries": ["RU", "BY"]}"#;

const PERSISTED: &str = r#"[
    {"key": "international_ip_address", "outcome": "block",
     "check": {"key": "ip_country", "operator": "in", "value": "ru|by"}},
    {"key": "purchase_price_threshold", "outcome": "review",
     "check": {"key": "order_total", "operator": "greater_than", "value": 50000}}
]"#;

fn main() -> Result<(), fraud_rules::FraudRulesError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = StoreConfig::from_json(STORE)?;
    let ruleset = Ruleset::from_json(PERSISTED)?;

    println!("{ruleset} -> {}", ruleset.matching_protection_level(&config));

    match Ruleset::from_json(r#"[{"key": "broken", "outcome": "deny", "check": {}}]"#) {
        Ok(_) => println!("unexpectedly valid"),
        Err(err) => println!("rejected: {err}"),
    }

    Ok(())
}
