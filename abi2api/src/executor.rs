//! Client for the external contract-execution service.
//!
//! The service receives a contract address, an endpoint name, the endpoint
//! metadata list, the raw ABI and the positional argument list, performs the
//! actual on-chain query and answers with a status code and a JSON payload.
//! Argument encoding and gateway transport are entirely its concern, this
//! client only ferries JSON back and forth. No retry policy, a failure
//! surfaces to the caller as-is.

use crate::error::ApiError;
use awc::http::header;
use awc::Client;
use mxabi::Endpoint;
use serde_json::Value;
use std::time::Duration;

/// Maximum executor response body size we are willing to buffer.
const RESPONSE_SIZE_LIMIT: usize = 16 * 1024 * 1024;

/// One positional argument of a contract call. Serialized as
/// `{"value": ..., "type": ...}`, the executor maps arguments by position.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CallArg {
    pub value: String,
    #[serde(rename = "type")]
    pub arg_type: String,
}

#[derive(Serialize, Debug)]
struct ExecuteRequest<'a> {
    #[serde(rename = "scAddress")]
    contract_address: &'a str,
    endpoint: &'a str,
    endpoints: &'a [Endpoint],
    abi: &'a Value,
    args: &'a [CallArg],
}

#[derive(Clone)]
pub struct ExecutorClient {
    url: String,
    timeout: Duration,
}

impl ExecutorClient {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            timeout,
        }
    }

    /// Invokes the execution service and returns its `(status, payload)`
    /// pair unchanged.
    pub async fn execute(
        &self,
        contract_address: &str,
        endpoint_name: &str,
        endpoints: &[Endpoint],
        abi: &Value,
        args: &[CallArg],
    ) -> Result<(u16, Value), ApiError> {
        trace!("executing {endpoint_name} on {contract_address} with {args:?}");
        let payload = ExecuteRequest {
            contract_address,
            endpoint: endpoint_name,
            endpoints,
            abi,
            args,
        };
        // awc clients are cheap to build and not Send, one per call lets the
        // executor handle be shared across server workers
        let res = Client::default()
            .post(&self.url)
            .append_header((header::CONTENT_TYPE, "application/json"))
            .timeout(self.timeout)
            .send_json(&payload)
            .await;
        let mut res = match res {
            Ok(val) => val,
            Err(e) => return Err(ApiError::ExecutorUnreachable(e.to_string())),
        };
        let status = res.status().as_u16();
        let body = res
            .body()
            .limit(RESPONSE_SIZE_LIMIT)
            .await
            .map_err(|e| ApiError::ExecutorUnreachable(format!("reading response body: {e}")))?;
        let payload = if body.is_empty() {
            Value::Null
        } else {
            // non-JSON bodies still propagate, wrapped as a plain string
            match serde_json::from_slice(&body) {
                Ok(val) => val,
                Err(_) => Value::String(String::from_utf8_lossy(&body).into_owned()),
            }
        };
        trace!("executor answered {status}");
        Ok((status, payload))
    }
}

#[test]
fn call_arg_serializes_with_type_key() {
    let arg = CallArg {
        value: "1234".to_string(),
        arg_type: "u32".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&arg).unwrap(),
        serde_json::json!({"value": "1234", "type": "u32"})
    );
}
