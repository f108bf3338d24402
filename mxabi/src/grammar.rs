//! Type-string grammar helpers.
//!
//! ABI type-strings use a compact generics-like grammar:
//! `modifier? base ("<" params ">")?` where the params of a wrapper may
//! themselves be full type-strings. Decomposition here is deliberately
//! shallow: only the outermost wrapper is recognized, the substring between
//! the first `<` and the last `>` is handed back opaque and re-decomposed
//! by the recursive resolver.

/// Wrapper names understood by the output resolver.
pub const WRAPPERS: [&str; 8] = [
    "variadic", "List", "vec", "Option", "optional", "tuple", "enum", "multi",
];

/// Splits `wrapper<params>` into `(wrapper, params)`. Returns `None` when
/// the string carries no well-formed outer bracket pair; malformed strings
/// with unmatched brackets land on the UnknownType path instead of erroring.
pub fn wrapper_of(type_name: &str) -> Option<(&str, &str)> {
    let open = type_name.find('<')?;
    let close = type_name.rfind('>')?;
    if close <= open {
        return None;
    }
    Some((&type_name[..open], &type_name[open + 1..close]))
}

/// Comma split at bracket depth zero, trimming each part. Nested generics
/// are consumed as one opaque part.
pub fn split_top_level(params: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in params.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(params[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(params[start..].trim());
    parts
}

/// Removes every `<...>` segment, shortest match first. Used only by the
/// coarse input typing path.
pub fn strip_generics(type_name: &str) -> String {
    let mut out = String::with_capacity(type_name.len());
    let mut rest = type_name;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(off) => rest = &rest[open + off + 1..],
            None => {
                // unmatched bracket, keep the tail as-is
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Removes the literal substrings `optional` and `variadic` wherever they
/// appear, not only as a prefix. Intentionally permissive, input path only.
pub fn strip_modifiers(type_name: &str) -> String {
    type_name.replace("optional", "").replace("variadic", "")
}

#[test]
fn wrapper_decomposition() {
    assert_eq!(wrapper_of("List<u32>"), Some(("List", "u32")));
    assert_eq!(
        wrapper_of("variadic<multi<u32,Address>>"),
        Some(("variadic", "multi<u32,Address>"))
    );
    assert_eq!(wrapper_of("u64"), None);
    // unmatched brackets are not a wrapper
    assert_eq!(wrapper_of("List<u32"), None);
    assert_eq!(wrapper_of(">List<"), None);
}

#[test]
fn top_level_split_respects_nesting() {
    assert_eq!(split_top_level("u32,bool"), vec!["u32", "bool"]);
    assert_eq!(
        split_top_level("tuple<u8,u16>, Address"),
        vec!["tuple<u8,u16>", "Address"]
    );
    assert_eq!(split_top_level("u64"), vec!["u64"]);
}

#[test]
fn generic_and_modifier_stripping() {
    assert_eq!(strip_generics("List<BigUint>"), "List");
    assert_eq!(strip_generics("multi<u32>pairs<u64>"), "multipairs");
    assert_eq!(strip_generics("List<u32"), "List<u32");
    assert_eq!(strip_modifiers("optional<u32>"), "<u32>");
    assert_eq!(strip_modifiers("variadicAddress"), "Address");
}
