use fraud_rules::{ProtectionLevel, StoreConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let configs = [
        ("all countries", StoreConfig::all_countries()),
        ("US and Canada only", StoreConfig::specific(["US", "CA"])),
    ];

    for (label, config) in &configs {
        println!("== {label}");
        for level in ProtectionLevel::PRESETS {
            let rules = level.rules(config);
            println!("{level}: {rules}");
            for rule in &rules {
                println!("  {rule}");
            }
            assert_eq!(rules.matching_protection_level(config), level);
        }
    }
}
