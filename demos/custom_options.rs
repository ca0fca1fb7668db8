//! Customizing HCL layout with HclOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_hcl_encoder::{to_string, to_string_with_options, HclOptions};
use std::error::Error;

#[derive(Serialize)]
struct Database {
    host: String,
    port: u16,
    max_connections: u32,
}

#[derive(Serialize)]
struct Config {
    name: String,
    debug: bool,
    database: Database,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        debug: true,
        database: Database {
            host: "localhost".to_string(),
            port: 5432,
            max_connections: 20,
        },
    };

    println!("Default (2-space indent, aligned):");
    println!("{}", to_string(&config)?);

    println!("4-space indent:");
    let wide = HclOptions::new().with_indent(4);
    println!("{}", to_string_with_options(&config, wide)?);

    println!("No alignment:");
    let compact = HclOptions::new().with_aligned_attributes(false);
    println!("{}", to_string_with_options(&config, compact)?);

    Ok(())
}
