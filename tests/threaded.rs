use std::sync::Arc;
use std::thread;

use fraud_rules::{
    get_matching_protection_level, high_protection_settings, ProtectionLevel, Ruleset,
    StoreConfig,
};

#[test]
fn classify_across_threads() {
    let config = Arc::new(StoreConfig::specific(["US", "CA"]));
    let persisted = Arc::new(
        Ruleset::from_array(&serde_json::Value::Array(high_protection_settings(&config))).unwrap(),
    );

    let mut handles = vec![];

    // Thread 1: persisted high ruleset -> high
    let (cfg, rs) = (Arc::clone(&config), Arc::clone(&persisted));
    handles.push(thread::spawn(move || rs.matching_protection_level(&cfg)));

    // Thread 2: freshly generated standard preset -> standard
    let cfg = Arc::clone(&config);
    handles.push(thread::spawn(move || {
        let arrays = ProtectionLevel::Standard.rules(&cfg).to_rule_arrays();
        get_matching_protection_level(&arrays, &cfg)
    }));

    // Thread 3: persisted ruleset with one rule dropped -> custom
    let (cfg, rs) = (Arc::clone(&config), Arc::clone(&persisted));
    handles.push(thread::spawn(move || {
        let trimmed: Ruleset = rs.iter().skip(1).cloned().collect();
        trimmed.matching_protection_level(&cfg)
    }));

    // Thread 4: same ruleset under a different store configuration -> custom
    let rs = Arc::clone(&persisted);
    handles.push(thread::spawn(move || {
        rs.matching_protection_level(&StoreConfig::all_countries())
    }));

    let results: Vec<ProtectionLevel> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0], ProtectionLevel::High);
    assert_eq!(results[1], ProtectionLevel::Standard);
    assert_eq!(results[2], ProtectionLevel::Custom);
    assert_eq!(results[3], ProtectionLevel::Custom);
}

#[test]
fn value_types_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<fraud_rules::Check>();
    assert_send_sync::<fraud_rules::Checklist>();
    assert_send_sync::<fraud_rules::Rule>();
    assert_send_sync::<Ruleset>();
    assert_send_sync::<StoreConfig>();
}
