//! Encoding dynamic values: the hcl_value! macro, serde_json input and
//! hand-built records.
//!
//! Run with: cargo run --example dynamic_values

use serde_hcl_encoder::{
    hcl_value, to_string, Document, FieldDescriptor, HclOptions, Record, Value,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Maps at the root become the document body, keys sorted.
    let settings = hcl_value!({
        "region": "eu-west-1",
        "replicas": 3,
        "zones": ["a", "b", "c"],
        "tags": { "team": "core", "env": "prod" }
    });
    println!("hcl_value!:\n{}", to_string(&settings)?);

    // Anything serde can serialize works too.
    let json = serde_json::json!({
        "name": "web-${var.env}",
        "ports": [80, 443],
        "enabled": true
    });
    println!("serde_json:\n{}", to_string(&json)?);

    // Records built by hand keep their field descriptors.
    let rule = |port: u16| {
        Value::Record(
            Record::new("Rule")
                .with_field(FieldDescriptor::named("name").with_key(), format!("allow-{}", port))
                .with_field(FieldDescriptor::named("port"), port)
                .with_field(FieldDescriptor::named("cidr").with_raw_expression(), "var.cidr"),
        )
    };
    let firewall = Record::new("Firewall").with_field(
        FieldDescriptor::named("rule").with_repeated_block(),
        vec![rule(80), rule(443)],
    );
    let doc = Document::from_value(&Value::Record(firewall))?;
    println!("records:\n{}", doc.render(&HclOptions::default()));

    Ok(())
}
