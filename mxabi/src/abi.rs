//! The ABI document model.
//!
//! Deserialized straight from the ABI JSON a contract build emits. Unknown
//! fields are ignored so newer ABI revisions keep loading. A document is
//! parsed once at startup and read-only afterwards.

use std::collections::BTreeMap;

/// Custom type definitions keyed by type name. Type-strings reference these
/// by name only, so forward references within the same document are fine.
pub type TypeRegistry = BTreeMap<String, CustomType>;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AbiDocument {
    pub name: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub types: TypeRegistry,
}

/// Endpoint mutability. Anything this crate does not know about maps to
/// `Other` so a newer ABI revision still loads, those endpoints are simply
/// not readonly.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    Readonly,
    Mutable,
    #[serde(other)]
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Endpoint {
    pub name: String,
    pub mutability: Mutability,
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub outputs: Vec<Output>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<Vec<String>>,
}

impl Endpoint {
    pub fn is_readonly(&self) -> bool {
        self.mutability == Mutability::Readonly
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Input {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub multi_arg: bool,
}

impl Input {
    /// Optionality is not a separate ABI field, it is encoded as a prefix
    /// on the type-string.
    pub fn is_optional(&self) -> bool {
        self.type_name.starts_with("optional")
    }
}

/// An endpoint output. The ABI format allows the `type` field to be either
/// a single type-string or a list of them.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Output {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<OutputType>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum OutputType {
    One(String),
    Many(Vec<String>),
}

impl Output {
    /// The type-string to resolve. The list form is unwrapped by taking its
    /// first element, a convention of the source ABI format. A missing type
    /// falls back to the literal `"output"`.
    pub fn type_str(&self) -> &str {
        match &self.type_name {
            Some(OutputType::One(s)) => s,
            Some(OutputType::Many(list)) => list.first().map(String::as_str).unwrap_or("output"),
            None => "output",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CustomType {
    Struct { fields: Vec<StructField> },
    Enum { variants: Vec<EnumVariant> },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StructField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

/// Enum variants may carry extra metadata (discriminants) in the ABI, only
/// the name matters for schema generation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EnumVariant {
    pub name: String,
}

#[test]
fn parses_abi_document() {
    let json = r#"{
        "name": "Staking",
        "endpoints": [
            {
                "name": "getStake",
                "mutability": "readonly",
                "inputs": [{"name": "address", "type": "Address"}],
                "outputs": [{"type": "BigUint"}],
                "docs": ["Returns the staked amount."]
            },
            {
                "name": "stake",
                "mutability": "mutable",
                "inputs": [],
                "outputs": []
            }
        ],
        "types": {
            "Reward": {
                "type": "struct",
                "fields": [{"name": "amount", "type": "BigUint"}]
            },
            "Status": {
                "type": "enum",
                "variants": [{"name": "Active"}, {"name": "Inactive"}]
            }
        }
    }"#;
    let abi: AbiDocument = serde_json::from_str(json).unwrap();
    assert_eq!(abi.name, "Staking");
    assert_eq!(abi.endpoints.len(), 2);
    assert!(abi.endpoints[0].is_readonly());
    assert!(!abi.endpoints[1].is_readonly());
    assert_eq!(abi.endpoints[0].outputs[0].type_str(), "BigUint");
    assert!(matches!(
        abi.types.get("Reward"),
        Some(CustomType::Struct { .. })
    ));
    assert!(matches!(
        abi.types.get("Status"),
        Some(CustomType::Enum { .. })
    ));
}

#[test]
fn unrecognized_mutability_still_loads() {
    let json = r#"{
        "name": "Oracle",
        "endpoints": [
            {
                "name": "getPrice",
                "mutability": "readonly",
                "inputs": [],
                "outputs": [{"type": "BigUint"}]
            },
            {
                "name": "peek",
                "mutability": "pure",
                "inputs": [],
                "outputs": [{"type": "BigUint"}]
            }
        ],
        "types": {}
    }"#;
    let abi: AbiDocument = serde_json::from_str(json).unwrap();
    assert_eq!(abi.endpoints.len(), 2);
    assert_eq!(abi.endpoints[1].mutability, Mutability::Other);
    assert!(!abi.endpoints[1].is_readonly());
}

#[test]
fn output_list_form_unwraps_to_first() {
    let out: Output = serde_json::from_str(r#"{"type": ["u32", "u64"]}"#).unwrap();
    assert_eq!(out.type_str(), "u32");
    let out: Output = serde_json::from_str(r#"{"name": "sum"}"#).unwrap();
    assert_eq!(out.type_str(), "output");
}

#[test]
fn input_optionality_from_prefix() {
    let input: Input =
        serde_json::from_str(r#"{"name": "b", "type": "optional<u32>"}"#).unwrap();
    assert!(input.is_optional());
    assert!(!input.multi_arg);
    let input: Input =
        serde_json::from_str(r#"{"name": "ids", "type": "variadic<u64>", "multi_arg": true}"#)
            .unwrap();
    assert!(!input.is_optional());
    assert!(input.multi_arg);
}
