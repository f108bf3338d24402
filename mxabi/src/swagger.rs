//! Swagger 2.0 document generation.
//!
//! Walks the readonly endpoints of one contract and assembles the full
//! document: one GET path per endpoint, a `{endpoint}_response` definition
//! each, query parameters typed through the coarse input resolver and
//! response schemas expanded through the recursive output resolver.
//!
//! The document is rebuilt on every request, nothing is cached.

use crate::abi::{AbiDocument, Endpoint, Input};
use crate::resolver::{resolve_input_type, ResolveContext};
use serde_json::{json, Map, Value};

pub fn build_swagger(app_name: &str, contract_address: &str, abi: &AbiDocument) -> Value {
    let ctx = ResolveContext::new(&abi.types);
    let mut paths = Map::new();
    let mut definitions = Map::new();

    for endpoint in abi.endpoints.iter().filter(|e| e.is_readonly()) {
        let parameters: Vec<Value> = endpoint.inputs.iter().map(input_parameter).collect();
        let schema = response_schema(&ctx, endpoint);
        let description = match &endpoint.docs {
            Some(docs) => docs.join("\n"),
            None => format!("No documentation available for {}.", endpoint.name),
        };
        definitions.insert(format!("{}_response", endpoint.name), schema.clone());
        paths.insert(
            format!("/{}/{}", app_name, endpoint.name),
            json!({
                "get": {
                    "summary": endpoint.name,
                    "description": description,
                    "parameters": parameters,
                    "responses": {
                        "200": {
                            "description": "Success",
                            "schema": schema,
                        }
                    },
                    "tags": [app_name],
                }
            }),
        );
    }

    json!({
        "swagger": "2.0",
        "info": {
            "title": format!("abi2api - API for smart contract: {}", abi.name),
            "description": format!(
                "Swagger documentation generated from the ABI JSON of the smart contract at \
                 address <a href=\"https://explorer.multiversx.com/accounts/{addr}\">{addr}</a> \
                 on the MultiversX blockchain.",
                addr = contract_address
            ),
            "version": "1.0",
        },
        "paths": paths,
        "definitions": definitions,
        "tags": [
            {
                "name": app_name,
                "description": format!(
                    "Endpoints with `readonly` mutability for smart contract: `{app_name}`"
                ),
            }
        ],
    })
}

fn input_parameter(input: &Input) -> Value {
    let mut parameter = json!({
        "name": input.name,
        "in": "query",
        "required": !input.is_optional(),
    });
    if input.multi_arg {
        parameter["type"] = json!("array");
        parameter["items"] = json!({"type": "string"});
    } else {
        parameter["type"] = json!(resolve_input_type(&input.type_name));
    }
    parameter
}

/// Success-response schema, one property per output keyed by output name.
/// Unnamed outputs share the `output` key, so multiple unnamed outputs
/// collapse into one property (a documented limitation of the source ABI
/// format).
fn response_schema(ctx: &ResolveContext<'_>, endpoint: &Endpoint) -> Value {
    let mut properties = Map::new();
    for output in &endpoint.outputs {
        let key = output.name.clone().unwrap_or_else(|| "output".to_string());
        properties.insert(key, ctx.resolve(output.type_str()).to_swagger());
    }
    json!({
        "type": "object",
        "properties": properties,
    })
}
