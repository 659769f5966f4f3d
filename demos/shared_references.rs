//! Preserving shared objects with module emission.
//!
//! Run with: cargo run --example shared_references

use chrono::Utc;
use serde_jslit::{
    serialize, serialize_to_module, serialize_with_options, Object, Options, Value,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let defaults = Object::new();
    defaults.insert("retries", 3);
    defaults.insert("pattern", Value::regexp("^api/", "i")?);
    defaults.insert("created", Value::date(Utc::now()));

    let staging = Object::new();
    staging.insert("limits", defaults.clone());

    let config = Value::object([
        ("defaults", Value::from(defaults.clone())),
        ("production", Value::from(defaults)),
        ("staging", Value::from(staging)),
    ]);

    // Every appearance rendered in full; identity is lost.
    println!("Plain literal:\n{}\n", serialize(&config)?);

    // Repeats elided and reported.
    let tracked = serialize_with_options(&config, &Options::new().with_reference(true))?;
    println!("Tracked literal:\n{}", tracked.text);
    for reference in &tracked.references {
        println!("  {} -> {}", reference.path, reference.target);
    }
    println!();

    // Identity restored by alias statements.
    println!("Module:\n{}", serialize_to_module(&config)?);

    Ok(())
}
