//! Static scalar type tables.
//!
//! The output table maps every primitive ABI type to its JSON type and a
//! fixed representative example. The input table is coarser, it only picks
//! the declared Swagger query parameter type.

use serde_json::{json, Value};
use std::collections::HashMap;

/// Example address shown in generated documentation.
pub const EXAMPLE_ADDRESS: &str =
    "erd1ccxmfaganejartfyr9ack4lnudxam8ezzwn23k3x5nls97rjaeds7f2wu2";

lazy_static! {
    static ref OUTPUT_SCALARS: HashMap<&'static str, (&'static str, Value)> = {
        let mut m = HashMap::new();
        m.insert("i8", ("integer", json!(1)));
        m.insert("i16", ("integer", json!(12)));
        m.insert("i32", ("integer", json!(1234)));
        m.insert("i64", ("integer", json!(12345678)));
        m.insert("u8", ("integer", json!(1)));
        m.insert("u16", ("integer", json!(12)));
        m.insert("u32", ("integer", json!(1234)));
        m.insert("u64", ("integer", json!(12345678)));
        m.insert("isize", ("integer", json!(1)));
        m.insert("usize", ("integer", json!(1)));
        m.insert(
            "bytes",
            (
                "string",
                json!("When the time of the White Frost comes, do not eat the yellow snow!"),
            ),
        );
        m.insert("bool", ("boolean", json!(false)));
        m.insert("BigUint", ("string", json!("69000000000000000000")));
        m.insert("BigInt", ("string", json!("69000000000000000000")));
        m.insert("EgldOrEsdtTokenIdentifier", ("string", json!("EGLD")));
        m.insert("TokenIdentifier", ("string", json!("ELLAMA-6c0295")));
        m.insert("Address", ("string", json!(EXAMPLE_ADDRESS)));
        m
    };
}

/// Looks up a primitive output type, returning its JSON type name and
/// example value.
pub fn output_scalar(type_name: &str) -> Option<(&'static str, Value)> {
    OUTPUT_SCALARS
        .get(type_name)
        .map(|(t, example)| (*t, example.clone()))
}

/// Coarse input typing for Swagger query parameters.
pub fn input_scalar(type_name: &str) -> Option<&'static str> {
    match type_name {
        "BigUint" | "u64" | "u32" | "u8" => Some("integer"),
        "bool" => Some("boolean"),
        "Address" | "TokenIdentifier" | "EgldOrEsdtTokenIdentifier" => Some("string"),
        _ => None,
    }
}

#[test]
fn output_table_examples() {
    let (t, example) = output_scalar("u64").unwrap();
    assert_eq!(t, "integer");
    assert_eq!(example, json!(12345678));
    let (t, example) = output_scalar("BigUint").unwrap();
    assert_eq!(t, "string");
    assert_eq!(example, json!("69000000000000000000"));
    assert!(output_scalar("NotAType").is_none());
}

#[test]
fn input_table_lookup() {
    assert_eq!(input_scalar("u32"), Some("integer"));
    assert_eq!(input_scalar("bool"), Some("boolean"));
    assert_eq!(input_scalar("Address"), Some("string"));
    assert_eq!(input_scalar("List"), None);
}
