//! # Introduction
//! mxabi turns a MultiversX smart contract ABI document into Swagger
//! schemas. It parses the ABI JSON (endpoints, custom struct/enum types,
//! type-strings with generics-like wrappers) and expands every readonly
//! endpoint's output type into a fully populated schema tree with example
//! values.
//!
//! ## Getting started
//! ```rust
//! use mxabi::{AbiDocument, ResolveContext};
//!
//! let abi: AbiDocument = serde_json::from_str(
//!     r#"{"name": "Adder", "endpoints": [], "types": {}}"#,
//! )
//! .unwrap();
//!
//! let ctx = ResolveContext::new(&abi.types);
//! let schema = ctx.resolve("List<BigUint>");
//! assert_eq!(schema.to_swagger()["type"], "array");
//! ```
//!
//! The crate is pure: no I/O, no async, no global state. The HTTP layer
//! lives in the `abi2api` crate.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;

pub mod abi;
pub mod grammar;
pub mod resolver;
pub mod scalars;
pub mod swagger;

pub use abi::{AbiDocument, CustomType, Endpoint, Input, Mutability, Output, TypeRegistry};
pub use resolver::{resolve_input_type, ResolveContext, ResolvedSchema, SchemaKind};
pub use swagger::build_swagger;
