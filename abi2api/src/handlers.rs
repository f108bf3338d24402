//! Request handlers and dynamic route construction.
//!
//! Routable GET resources are not hand-written, they are built from the
//! catalog at startup: one [`EndpointHandler`] per readonly endpoint, each
//! closing over its app entry and endpoint metadata. The Swagger document
//! and the documentation page are served by parameterized routes that look
//! the app up per request.

use crate::catalog::{AppEntry, EndpointCatalog};
use crate::docs;
use crate::error::ApiError;
use crate::executor::{CallArg, ExecutorClient};
use actix_web::{web, HttpResponse};
use mxabi::Endpoint;
use std::collections::HashMap;
use std::sync::Arc;

/// One routable GET resource for a single readonly endpoint. Built once at
/// startup, cloned into the route closure of every server worker.
#[derive(Clone)]
pub struct EndpointHandler {
    app_name: String,
    entry: Arc<AppEntry>,
    endpoint: Endpoint,
}

impl EndpointHandler {
    pub fn new(app_name: &str, entry: &Arc<AppEntry>, endpoint: &Endpoint) -> Self {
        Self {
            app_name: app_name.to_string(),
            entry: Arc::clone(entry),
            endpoint: endpoint.clone(),
        }
    }

    /// Collects query parameters into a positional argument list and
    /// forwards the call to the execution service. A non-200 executor
    /// answer propagates with its status code and a `{"error": ...}` body.
    pub async fn handle(
        &self,
        query: HashMap<String, String>,
        executor: &ExecutorClient,
    ) -> Result<HttpResponse, ApiError> {
        let contract_address = query
            .get("smartcontractaddress")
            .cloned()
            .unwrap_or_else(|| self.entry.contract_address.clone());
        let args = build_call_args(&self.endpoint, &query);
        debug!(
            "{}/{} -> {} ({} args)",
            self.app_name,
            self.endpoint.name,
            contract_address,
            args.len()
        );
        let (status, payload) = executor
            .execute(
                &contract_address,
                &self.endpoint.name,
                &self.entry.abi.endpoints,
                &self.entry.raw_abi,
                &args,
            )
            .await?;
        if status != 200 {
            return Err(ApiError::ExecutorFailure { status, payload });
        }
        Ok(HttpResponse::Ok().json(payload))
    }
}

/// Assembles the argument list for one call, preserving the endpoint's
/// declared input order. Order is load-bearing, the executor maps arguments
/// by position. Every input appears exactly once: a missing query value
/// becomes an empty string, never an omitted argument. Optional multi-arg
/// inputs send only their first comma-separated element, a convention
/// carried over from the source ABI tooling.
pub fn build_call_args(endpoint: &Endpoint, query: &HashMap<String, String>) -> Vec<CallArg> {
    let mut args = Vec::with_capacity(endpoint.inputs.len());
    for input in &endpoint.inputs {
        let raw = query.get(&input.name).cloned().unwrap_or_default();
        let value = if input.multi_arg && input.is_optional() {
            raw.split(',').next().unwrap_or_default().to_string()
        } else {
            raw
        };
        args.push(CallArg {
            value,
            arg_type: input.type_name.clone(),
        });
    }
    args
}

/// Registers every route: per-endpoint resources first, then the
/// parameterized Swagger and docs routes.
pub fn register_routes(cfg: &mut web::ServiceConfig, catalog: &Arc<EndpointCatalog>) {
    for (app_name, entry) in catalog.iter() {
        for endpoint in entry.abi.endpoints.iter().filter(|e| e.is_readonly()) {
            let handler = EndpointHandler::new(app_name, entry, endpoint);
            let path = format!("/{}/{}", app_name, endpoint.name);
            cfg.route(
                &path,
                web::get().to(
                    move |query: web::Query<HashMap<String, String>>,
                          executor: web::Data<ExecutorClient>| {
                        let handler = handler.clone();
                        async move { handler.handle(query.into_inner(), &executor).await }
                    },
                ),
            );
        }
    }
    cfg.route("/api/{app_name}/swagger.json", web::get().to(swagger_json));
    cfg.route("/{app_name}/", web::get().to(docs_page));
    // anything left over in the two-segment shape is an endpoint that does
    // not exist or is not readonly, answer with a JSON error body
    cfg.route(
        "/{app_name}/{endpoint_name}",
        web::get().to(unknown_endpoint),
    );
}

async fn unknown_endpoint(
    path: web::Path<(String, String)>,
    catalog: web::Data<EndpointCatalog>,
) -> Result<HttpResponse, ApiError> {
    let (app_name, endpoint_name) = path.into_inner();
    catalog.lookup(&app_name)?;
    Err(ApiError::UnknownEndpoint {
        app: app_name,
        endpoint: endpoint_name,
    })
}

async fn swagger_json(
    path: web::Path<String>,
    catalog: web::Data<EndpointCatalog>,
) -> Result<HttpResponse, ApiError> {
    let app_name = path.into_inner();
    let entry = catalog.lookup(&app_name)?;
    let document = mxabi::build_swagger(&app_name, &entry.contract_address, &entry.abi);
    Ok(HttpResponse::Ok().json(document))
}

async fn docs_page(
    path: web::Path<String>,
    catalog: web::Data<EndpointCatalog>,
) -> Result<HttpResponse, ApiError> {
    let app_name = path.into_inner();
    catalog.lookup(&app_name)?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(docs::swagger_ui_page(&app_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(json: &str) -> Endpoint {
        serde_json::from_str(json).unwrap()
    }

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn args_preserve_declared_order() {
        let endpoint = endpoint(
            r#"{
                "name": "getSum",
                "mutability": "readonly",
                "inputs": [
                    {"name": "a", "type": "u32"},
                    {"name": "b", "type": "optional<u32>"}
                ],
                "outputs": []
            }"#,
        );
        let args = build_call_args(&endpoint, &query(&[("b", "7"), ("a", "3")]));
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].value, "3");
        assert_eq!(args[0].arg_type, "u32");
        assert_eq!(args[1].value, "7");
        assert_eq!(args[1].arg_type, "optional<u32>");
    }

    #[test]
    fn missing_inputs_become_empty_strings() {
        let endpoint = endpoint(
            r#"{
                "name": "getSum",
                "mutability": "readonly",
                "inputs": [
                    {"name": "a", "type": "u32"},
                    {"name": "b", "type": "optional<u32>"}
                ],
                "outputs": []
            }"#,
        );
        let args = build_call_args(&endpoint, &query(&[("a", "3")]));
        assert_eq!(args.len(), 2);
        assert_eq!(args[1].value, "");
    }

    #[test]
    fn optional_multi_arg_sends_first_element_only() {
        let endpoint = endpoint(
            r#"{
                "name": "getPrices",
                "mutability": "readonly",
                "inputs": [
                    {"name": "tokens", "type": "optional<variadic<TokenIdentifier>>", "multi_arg": true},
                    {"name": "ids", "type": "variadic<u64>", "multi_arg": true}
                ],
                "outputs": []
            }"#,
        );
        let args = build_call_args(
            &endpoint,
            &query(&[("tokens", "EGLD,MEX"), ("ids", "1,2,3")]),
        );
        assert_eq!(args[0].value, "EGLD");
        // non-optional multi-args pass the raw comma list through
        assert_eq!(args[1].value, "1,2,3");
    }
}
