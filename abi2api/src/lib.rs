//! Serves a MultiversX smart contract's ABI as a queryable HTTP API.
//!
//! At startup every configured contract ("app") is registered in the
//! [`catalog::EndpointCatalog`]: its ABI JSON is fetched from a URL or read
//! from disk and parsed once. The server then exposes, per app:
//!
//! * `GET /{app}/{endpoint}` for every readonly endpoint, forwarding query
//!   parameters as positional arguments to the external execution service
//! * `GET /api/{app}/swagger.json`, the generated Swagger 2.0 document
//! * `GET /{app}/`, an interactive Swagger UI page
//!
//! Schema generation itself lives in the `mxabi` crate, this crate is the
//! catalog, the executor client and the actix-web wiring around it.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

pub mod catalog;
pub mod config;
pub mod docs;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod server;

pub use error::ApiError;
