use fraud_rules::{key, Checklist, Outcome, Rule, Ruleset};

fn main() {
    // Define rules
    let small_or_bulk = Checklist::new(
        "or",
        vec![
            key("item_count").less_than(2),
            key("item_count").greater_than(10),
        ],
    )
    .expect("'or' is a list operator");

    let ruleset = Ruleset::new(vec![
        Rule::new("order_items_threshold", "review", small_or_bulk).expect("valid outcome"),
        Rule::with_outcome(
            "purchase_price_threshold",
            Outcome::Block,
            key("order_total").greater_than(100_000),
        )
        .expect("check is well formed"),
    ]);

    println!("{ruleset}");
    for rule in &ruleset {
        println!("  {rule}");
    }

    // Wire form handed to the risk backend
    println!("{}", ruleset.to_json());
}
