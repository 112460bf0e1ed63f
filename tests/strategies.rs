#![allow(dead_code)]

use fraud_rules::{key, Check, CompareOp, ListOp, Outcome, Rule, Ruleset, Value};
use proptest::prelude::*;
use serde_json::{json, Value as Json};

// --- Signal schema ---
// ip_country / billing_country : string or list of lowercase country codes
// item_count                   : i64 (0..=50)
// order_total                  : i64 minor units, or finite f64
// billing_shipping_address_same: bool

const COUNTRIES: &[&str] = &["", "us", "ca", "gb", "de", "us|ca"];
const KEYS: &[&str] = &[
    "international_ip_address",
    "order_items_threshold",
    "purchase_price_threshold",
    "address_mismatch",
    "international_billing_address",
];

fn arb_compare_op() -> impl Strategy<Value = CompareOp> {
    prop::sample::select(CompareOp::ALL.to_vec())
}

fn arb_list_op() -> impl Strategy<Value = ListOp> {
    prop::sample::select(ListOp::ALL.to_vec())
}

fn arb_country_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::sample::select(COUNTRIES).prop_map(Value::from),
        prop::collection::vec(prop::sample::select(COUNTRIES), 0..4).prop_map(Value::from),
    ]
}

/// Generate a leaf check on a random signal from the schema.
fn arb_leaf() -> impl Strategy<Value = Check> {
    prop_oneof![
        (prop::sample::select(&["ip_country", "billing_country"][..]), arb_country_value())
            .prop_map(|(signal, value)| key(signal).is_in(value)),
        (arb_compare_op(), 0_i64..=50).prop_map(|(op, n)| Check::Leaf {
            key: "item_count".to_owned(),
            operator: op,
            value: Value::Int(n),
        }),
        (arb_compare_op(), -1.0e9_f64..1.0e9).prop_map(|(op, total)| Check::Leaf {
            key: "order_total".to_owned(),
            operator: op,
            value: Value::Float(total),
        }),
        any::<bool>().prop_map(|same| key("billing_shipping_address_same").equals(same)),
    ]
}

/// Generate a check tree of bounded depth with 1..4 children per composite.
pub fn arb_check() -> impl Strategy<Value = Check> {
    arb_leaf().prop_recursive(4, 32, 4, |inner| {
        (arb_list_op(), prop::collection::vec(inner, 1..4))
            .prop_map(|(operator, checks)| Check::Composite { operator, checks })
    })
}

pub fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop::sample::select(Outcome::ALL.to_vec())
}

pub fn arb_rule() -> impl Strategy<Value = Rule> {
    (prop::sample::select(KEYS), arb_outcome(), arb_check())
        .prop_map(|(key, outcome, check)| {
            Rule::with_outcome(key, outcome, check).expect("generated checks are well formed")
        })
}

pub fn arb_ruleset() -> impl Strategy<Value = Ruleset> {
    prop::collection::vec(arb_rule(), 0..6).prop_map(Ruleset::new)
}

/// Arbitrary JSON values that may or may not look like a check.
pub fn arb_json() -> impl Strategy<Value = Json> {
    let leaf = prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::from),
        (-5_i64..20).prop_map(Json::from),
        prop::sample::select(
            &["", "and", "or", "in", "equals", "item_count", "xor"][..]
        )
        .prop_map(Json::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Json::Array),
            (
                prop::option::of(prop::sample::select(
                    &["and", "or", "in", "not_in", "equals", "less_than", "bogus"][..]
                )),
                prop::option::of(inner.clone()),
                prop::option::of(inner.clone()),
                prop::option::of(prop::collection::vec(inner, 0..3)),
            )
                .prop_map(|(operator, key, value, checks)| {
                    let mut obj = serde_json::Map::new();
                    if let Some(op) = operator {
                        obj.insert("operator".into(), json!(op));
                    }
                    if let Some(k) = key {
                        obj.insert("key".into(), k);
                    }
                    if let Some(v) = value {
                        obj.insert("value".into(), v);
                    }
                    if let Some(c) = checks {
                        obj.insert("checks".into(), Json::Array(c));
                    }
                    Json::Object(obj)
                }),
        ]
    })
}

/// Take a valid check array and alter it. Some alterations break the shape
/// (missing or unknown operator, mixed leaf/composite fields), others leave
/// it valid.
pub fn arb_mutated_check() -> impl Strategy<Value = Json> {
    (arb_check(), 0_u8..6).prop_map(|(check, mutation)| {
        let mut json = check.to_array();
        let obj = json.as_object_mut().expect("check arrays are objects");
        match mutation {
            0 => {
                obj.remove("operator");
            }
            1 => {
                obj.insert("operator".into(), json!("between"));
            }
            2 => {
                obj.insert("checks".into(), json!([]));
            }
            3 => {
                obj.insert("key".into(), json!("item_count"));
            }
            4 => {
                obj.insert("value".into(), Json::Null);
            }
            _ => {
                obj.insert(
                    "checks".into(),
                    json!([{"key": "item_count", "operator": "less_than", "value": 2}]),
                );
            }
        }
        json
    })
}
