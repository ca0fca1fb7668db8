//! Annotated structs encoded as HCL blocks.
//!
//! Run with: cargo run --example farm

use serde::Serialize;
use serde_hcl_encoder::to_string;
use std::error::Error;

#[derive(Serialize)]
struct Address {
    street: String,
    city: String,
}

#[derive(Serialize)]
struct Animal {
    #[serde(rename = "name,key")]
    name: String,
    #[serde(rename = "says;omitempty")]
    sound: String,
    #[serde(rename = "legs;omitempty")]
    legs: u8,
}

#[derive(Serialize)]
struct Farm {
    #[serde(rename = "name,key")]
    name: String,
    #[serde(rename = ",squash")]
    address: Address,
    #[serde(rename = "animal,blocks")]
    animals: Vec<Animal>,
    #[serde(rename = "owner,expr")]
    owner: String,
    #[serde(rename = "ledger;omit")]
    ledger: Vec<u32>,
}

#[derive(Serialize)]
struct Document {
    farm: Farm,
}

fn main() -> Result<(), Box<dyn Error>> {
    let doc = Document {
        farm: Farm {
            name: "Old MacDonald".to_string(),
            address: Address {
                street: "1 Country Road".to_string(),
                city: "Springfield".to_string(),
            },
            animals: vec![
                Animal {
                    name: "cow".to_string(),
                    sound: "moo".to_string(),
                    legs: 4,
                },
                Animal {
                    name: "rock".to_string(),
                    sound: String::new(),
                    legs: 0,
                },
            ],
            owner: "var.farmers[0]".to_string(),
            ledger: vec![100, 250],
        },
    };

    println!("{}", to_string(&doc)?);
    Ok(())
}
