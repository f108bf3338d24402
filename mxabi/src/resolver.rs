//! Recursive schema resolution.
//!
//! [`ResolveContext`] expands an output type-string into a [`ResolvedSchema`]
//! tree, consulting the scalar table, the wrapper grammar and the contract's
//! custom type registry. Resolution is pure: the context carries an explicit
//! reference to the registry instead of reading shared state, and no branch
//! of the grammar ever errors. Malformed or unrecognized input degrades to
//! an `Unknown` node so the rest of a document still renders.

use crate::abi::TypeRegistry;
use crate::grammar;
use crate::scalars;
use crate::CustomType;
use serde_json::{json, Map, Value};

const UNKNOWN_PREFIX: &str = "Unknown Type: ";

/// A fully expanded schema node. Every node can render both its Swagger
/// JSON shape and a representative example value matching that shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    pub kind: SchemaKind,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Scalar {
        json_type: &'static str,
        example: Value,
    },
    /// Homogeneous array, one item schema.
    Array(Box<ResolvedSchema>),
    /// Heterogeneous tuple, one schema per position.
    Tuple(Vec<ResolvedSchema>),
    /// Ordered struct properties.
    Object(Vec<(String, ResolvedSchema)>),
    Enumeration(Vec<String>),
    /// Unresolved type. Holds the original name only, the human-readable
    /// label is rendered at serialization time so re-resolving a rendered
    /// label can never stack prefixes.
    Unknown(String),
}

impl ResolvedSchema {
    fn scalar(json_type: &'static str, example: Value) -> Self {
        ResolvedSchema {
            kind: SchemaKind::Scalar { json_type, example },
            nullable: false,
        }
    }

    fn array(item: ResolvedSchema) -> Self {
        ResolvedSchema {
            kind: SchemaKind::Array(Box::new(item)),
            nullable: false,
        }
    }

    fn tuple(items: Vec<ResolvedSchema>) -> Self {
        ResolvedSchema {
            kind: SchemaKind::Tuple(items),
            nullable: false,
        }
    }

    fn unknown(name: &str) -> Self {
        let mut original = name;
        while let Some(rest) = original.strip_prefix(UNKNOWN_PREFIX) {
            original = rest;
        }
        ResolvedSchema {
            kind: SchemaKind::Unknown(original.to_string()),
            nullable: false,
        }
    }

    /// Example value whose shape matches the node kind.
    pub fn example(&self) -> Value {
        match &self.kind {
            SchemaKind::Scalar { example, .. } => example.clone(),
            SchemaKind::Array(item) => json!([item.example()]),
            SchemaKind::Tuple(items) => Value::Array(items.iter().map(|i| i.example()).collect()),
            SchemaKind::Object(props) => {
                let mut map = Map::new();
                for (name, schema) in props {
                    map.insert(name.clone(), schema.example());
                }
                Value::Object(map)
            }
            SchemaKind::Enumeration(variants) => {
                // a zero-variant enum still needs a well-formed example
                Value::String(variants.first().cloned().unwrap_or_default())
            }
            SchemaKind::Unknown(_) => Value::String("unknown".to_string()),
        }
    }

    /// Renders the Swagger schema object for this node.
    pub fn to_swagger(&self) -> Value {
        let mut schema = match &self.kind {
            SchemaKind::Scalar { json_type, example } => json!({
                "type": json_type,
                "example": example,
            }),
            SchemaKind::Array(item) => json!({
                "type": "array",
                "items": item.to_swagger(),
                "example": self.example(),
            }),
            SchemaKind::Tuple(items) => json!({
                "type": "array",
                "items": items.iter().map(|i| i.to_swagger()).collect::<Vec<_>>(),
                "example": self.example(),
            }),
            SchemaKind::Object(props) => {
                let mut properties = Map::new();
                for (name, prop) in props {
                    properties.insert(name.clone(), prop.to_swagger());
                }
                json!({
                    "type": "object",
                    "properties": properties,
                    "example": self.example(),
                })
            }
            SchemaKind::Enumeration(variants) => json!({
                "type": "string",
                "enum": variants,
                "example": self.example(),
            }),
            SchemaKind::Unknown(name) => json!({
                "type": format!("{UNKNOWN_PREFIX}{name}"),
                "example": "unknown",
            }),
        };
        if self.nullable {
            schema["nullable"] = json!(true);
        }
        schema
    }
}

/// Resolution context for one contract. Holds a reference to the contract's
/// type registry, nothing else.
pub struct ResolveContext<'a> {
    types: &'a TypeRegistry,
}

impl<'a> ResolveContext<'a> {
    pub fn new(types: &'a TypeRegistry) -> Self {
        ResolveContext { types }
    }

    /// Expands a type-string into a schema tree. Never panics and never
    /// fails, undeclared or malformed types become `Unknown` nodes.
    pub fn resolve(&self, type_name: &str) -> ResolvedSchema {
        self.resolve_inner(type_name, &mut Vec::new())
    }

    fn resolve_inner(&self, type_name: &str, in_flight: &mut Vec<String>) -> ResolvedSchema {
        let type_name = type_name.trim();
        if let Some((json_type, example)) = scalars::output_scalar(type_name) {
            return ResolvedSchema::scalar(json_type, example);
        }
        if let Some((wrapper, params)) = grammar::wrapper_of(type_name) {
            match wrapper {
                "optional" | "Option" => {
                    let mut inner = self.resolve_inner(params, in_flight);
                    inner.nullable = true;
                    return inner;
                }
                "variadic" | "List" | "vec" | "multi" => {
                    return ResolvedSchema::array(self.resolve_inner(params, in_flight));
                }
                "tuple" => {
                    let items = grammar::split_top_level(params)
                        .into_iter()
                        .map(|p| self.resolve_inner(p, in_flight))
                        .collect();
                    return ResolvedSchema::tuple(items);
                }
                // unrecognized wrapper, falls through to the unknown path
                _ => {}
            }
        }
        if grammar::WRAPPERS.contains(&type_name) {
            return self.resolve_bare_wrapper(type_name, in_flight);
        }
        if self.types.contains_key(type_name) {
            return self.resolve_custom(type_name, in_flight);
        }
        if type_name.contains(',') && !type_name.contains('<') && !type_name.contains('>') {
            // bare comma list outside any brackets is an implicit tuple
            let items = grammar::split_top_level(type_name)
                .into_iter()
                .map(|p| self.resolve_inner(p, in_flight))
                .collect();
            return ResolvedSchema::tuple(items);
        }
        ResolvedSchema::unknown(type_name)
    }

    fn resolve_custom(&self, type_name: &str, in_flight: &mut Vec<String>) -> ResolvedSchema {
        if in_flight.iter().any(|t| t == type_name) {
            // self-referential definition, cut the expansion short
            return ResolvedSchema::unknown(type_name);
        }
        in_flight.push(type_name.to_string());
        let resolved = match &self.types[type_name] {
            CustomType::Enum { variants } => ResolvedSchema {
                kind: SchemaKind::Enumeration(variants.iter().map(|v| v.name.clone()).collect()),
                nullable: false,
            },
            CustomType::Struct { fields } => {
                let props = fields
                    .iter()
                    .map(|f| (f.name.clone(), self.resolve_inner(&f.field_type, in_flight)))
                    .collect();
                ResolvedSchema {
                    kind: SchemaKind::Object(props),
                    nullable: false,
                }
            }
        };
        in_flight.pop();
        resolved
    }

    /// A wrapper name with no parameter resolves using the name itself as
    /// the inner type, a self-referential fallback inherited from the source
    /// ABI conventions. The in-flight guard turns the recursion into a
    /// degenerate node with an `Unknown` leaf.
    fn resolve_bare_wrapper(&self, name: &str, in_flight: &mut Vec<String>) -> ResolvedSchema {
        if name == "enum" {
            // bare `enum` carries no variant list to draw from
            return ResolvedSchema::scalar("string", json!("enum_value"));
        }
        if in_flight.iter().any(|t| t == name) {
            return ResolvedSchema::unknown(name);
        }
        in_flight.push(name.to_string());
        let resolved = match name {
            "optional" | "Option" => {
                let mut inner = self.resolve_inner(name, in_flight);
                inner.nullable = true;
                inner
            }
            "tuple" => ResolvedSchema::tuple(vec![self.resolve_inner(name, in_flight)]),
            _ => ResolvedSchema::array(self.resolve_inner(name, in_flight)),
        };
        in_flight.pop();
        resolved
    }
}

/// Coarse typing for query parameters: strips modifiers and generic
/// segments, then consults the input scalar table. Anything unmatched is a
/// string.
pub fn resolve_input_type(type_name: &str) -> &'static str {
    let cleaned = grammar::strip_modifiers(type_name);
    let cleaned = cleaned.trim();
    // stripping a modifier word can leave its bare parameter list behind,
    // unwrap it so `optional<u32>` types as u32 rather than nothing
    let cleaned = match cleaned
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
    {
        Some(inner) => grammar::strip_generics(inner),
        None => grammar::strip_generics(cleaned),
    };
    scalars::input_scalar(cleaned.trim()).unwrap_or("string")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::AbiDocument;

    fn registry(types_json: &str) -> TypeRegistry {
        let abi: AbiDocument = serde_json::from_str(&format!(
            r#"{{"name": "Test", "endpoints": [], "types": {types_json}}}"#
        ))
        .unwrap();
        abi.types
    }

    fn empty() -> TypeRegistry {
        TypeRegistry::new()
    }

    #[test]
    fn scalars_resolve_exactly() {
        let types = empty();
        let ctx = ResolveContext::new(&types);
        assert_eq!(
            ctx.resolve("u64").to_swagger(),
            json!({"type": "integer", "example": 12345678})
        );
        assert_eq!(
            ctx.resolve("bool").to_swagger(),
            json!({"type": "boolean", "example": false})
        );
        assert_eq!(
            ctx.resolve("BigUint").to_swagger(),
            json!({"type": "string", "example": "69000000000000000000"})
        );
    }

    #[test]
    fn optional_is_nullable() {
        let types = empty();
        let ctx = ResolveContext::new(&types);
        let schema = ctx.resolve("optional<u64>").to_swagger();
        assert_eq!(schema["type"], "integer");
        assert_eq!(schema["nullable"], true);
        assert_eq!(schema["example"], 12345678);
        // Option<> behaves identically
        assert_eq!(schema, ctx.resolve("Option<u64>").to_swagger());
    }

    #[test]
    fn list_of_biguint() {
        let types = empty();
        let ctx = ResolveContext::new(&types);
        let schema = ctx.resolve("List<BigUint>").to_swagger();
        assert_eq!(schema["type"], "array");
        assert_eq!(
            schema["items"],
            json!({"type": "string", "example": "69000000000000000000"})
        );
        assert_eq!(schema["example"], json!(["69000000000000000000"]));
    }

    #[test]
    fn nested_wrappers_re_decompose() {
        let types = empty();
        let ctx = ResolveContext::new(&types);
        let schema = ctx.resolve("variadic<List<u32>>").to_swagger();
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["type"], "array");
        assert_eq!(schema["items"]["items"]["type"], "integer");
        assert_eq!(schema["example"], json!([[1234]]));
    }

    #[test]
    fn tuple_preserves_order() {
        let types = empty();
        let ctx = ResolveContext::new(&types);
        let schema = ctx.resolve("tuple<u32,bool>").to_swagger();
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"][0]["type"], "integer");
        assert_eq!(schema["items"][1]["type"], "boolean");
        assert_eq!(schema["example"], json!([1234, false]));
    }

    #[test]
    fn implicit_bare_comma_tuple() {
        let types = empty();
        let ctx = ResolveContext::new(&types);
        let schema = ctx.resolve("u8, bool").to_swagger();
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["example"], json!([1, false]));
    }

    #[test]
    fn struct_resolves_to_object() {
        let types = registry(
            r#"{"Pair": {"type": "struct", "fields": [
                {"name": "a", "type": "u8"},
                {"name": "b", "type": "TokenIdentifier"}
            ]}}"#,
        );
        let ctx = ResolveContext::new(&types);
        let schema = ctx.resolve("Pair").to_swagger();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["a"]["type"], "integer");
        assert_eq!(schema["properties"]["b"]["type"], "string");
        assert_eq!(schema["example"], json!({"a": 1, "b": "ELLAMA-6c0295"}));
    }

    #[test]
    fn enum_resolves_to_string_with_variants() {
        let types = registry(
            r#"{"Status": {"type": "enum", "variants": [
                {"name": "A"}, {"name": "B"}
            ]}}"#,
        );
        let ctx = ResolveContext::new(&types);
        assert_eq!(
            ctx.resolve("Status").to_swagger(),
            json!({"type": "string", "enum": ["A", "B"], "example": "A"})
        );
    }

    #[test]
    fn empty_enum_does_not_panic() {
        let types = registry(r#"{"Void": {"type": "enum", "variants": []}}"#);
        let ctx = ResolveContext::new(&types);
        let schema = ctx.resolve("Void").to_swagger();
        assert_eq!(schema["example"], "");
        assert_eq!(schema["enum"], json!([]));
    }

    #[test]
    fn unknown_type_is_labelled_once() {
        let types = empty();
        let ctx = ResolveContext::new(&types);
        let schema = ctx.resolve("Mystery").to_swagger();
        assert_eq!(schema["type"], "Unknown Type: Mystery");
        assert_eq!(schema["example"], "unknown");
        // re-resolving a rendered label must not stack prefixes
        let again = ctx.resolve("Unknown Type: Mystery").to_swagger();
        assert_eq!(again["type"], "Unknown Type: Mystery");
        let twice = ctx.resolve("Unknown Type: Unknown Type: Mystery").to_swagger();
        assert_eq!(twice["type"], "Unknown Type: Mystery");
    }

    #[test]
    fn malformed_brackets_degrade_to_unknown() {
        let types = empty();
        let ctx = ResolveContext::new(&types);
        let schema = ctx.resolve("List<u32").to_swagger();
        assert_eq!(schema["type"], "Unknown Type: List<u32");
    }

    #[test]
    fn bare_wrapper_names_are_degenerate() {
        let types = empty();
        let ctx = ResolveContext::new(&types);
        // the source grammar resolves a bare wrapper name against itself,
        // the in-flight guard bottoms the recursion out into an Unknown leaf
        let schema = ctx.resolve("List").to_swagger();
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["type"], "Unknown Type: List");
        assert_eq!(schema["example"], json!(["unknown"]));

        let schema = ctx.resolve("Option").to_swagger();
        assert_eq!(schema["nullable"], true);

        assert_eq!(
            ctx.resolve("enum").to_swagger(),
            json!({"type": "string", "example": "enum_value"})
        );
    }

    #[test]
    fn self_referential_struct_terminates() {
        let types = registry(
            r#"{"Node": {"type": "struct", "fields": [
                {"name": "value", "type": "u32"},
                {"name": "next", "type": "Node"}
            ]}}"#,
        );
        let ctx = ResolveContext::new(&types);
        let schema = ctx.resolve("Node").to_swagger();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["value"]["type"], "integer");
        assert_eq!(schema["properties"]["next"]["type"], "Unknown Type: Node");
    }

    #[test]
    fn resolution_is_idempotent() {
        let types = registry(
            r#"{"Reward": {"type": "struct", "fields": [
                {"name": "amount", "type": "BigUint"},
                {"name": "token", "type": "optional<TokenIdentifier>"}
            ]}}"#,
        );
        let ctx = ResolveContext::new(&types);
        assert_eq!(ctx.resolve("Reward"), ctx.resolve("Reward"));
        assert_eq!(
            ctx.resolve("List<Reward>").to_swagger(),
            ctx.resolve("List<Reward>").to_swagger()
        );
    }

    #[test]
    fn input_types_are_coarse() {
        assert_eq!(resolve_input_type("optional<u32>"), "integer");
        assert_eq!(resolve_input_type("Address"), "string");
        assert_eq!(resolve_input_type("u64"), "integer");
        assert_eq!(resolve_input_type("bool"), "boolean");
        assert_eq!(resolve_input_type("List<BigUint>"), "string");
        assert_eq!(resolve_input_type("variadic<u64>"), "integer");
        assert_eq!(resolve_input_type("CustomThing"), "string");
    }
}
