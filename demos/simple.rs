//! Rendering Rust data as a JavaScript literal.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use serde_jslit::{to_module, to_string, to_string_pretty};
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice O'Hara".to_string(),
            email: Some("alice@example.com".to_string()),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: None,
        },
    ];

    println!("Literal:\n{}\n", to_string(&users)?);
    println!("Pretty:\n{}\n", to_string_pretty(&users)?);
    println!("Module:\n{}", to_module(&users)?);

    Ok(())
}
