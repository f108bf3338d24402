//! Per-contract endpoint catalog.
//!
//! One entry per registered app: the contract address, the parsed ABI
//! document (including its type registry) and the raw ABI JSON the executor
//! wants forwarded. Registration happens once at startup, after that the
//! catalog is shared read-only across all server workers.

use crate::error::ApiError;
use mxabi::AbiDocument;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Refuse to buffer ABI documents larger than this when fetching over HTTP.
const ABI_SIZE_LIMIT: usize = 10 * 1024 * 1024;

pub struct AppEntry {
    pub contract_address: String,
    pub abi: AbiDocument,
    pub raw_abi: Value,
}

#[derive(Default)]
pub struct EndpointCatalog {
    apps: HashMap<String, Arc<AppEntry>>,
}

impl EndpointCatalog {
    /// Loads the ABI from `abi_source` (a `http(s)://` URL or a local file
    /// path) and registers it under `app_name`. Registering the same name
    /// again overwrites the previous entry.
    pub async fn register(
        &mut self,
        app_name: &str,
        contract_address: &str,
        abi_source: &str,
    ) -> Result<(), ApiError> {
        let raw_abi = load_abi(abi_source).await?;
        self.insert(app_name, contract_address, raw_abi)
    }

    /// Registers an already-loaded ABI JSON value. Last write wins.
    pub fn insert(
        &mut self,
        app_name: &str,
        contract_address: &str,
        raw_abi: Value,
    ) -> Result<(), ApiError> {
        let abi: AbiDocument =
            serde_json::from_value(raw_abi.clone()).map_err(|e| ApiError::BadAbi(e.to_string()))?;
        info!(
            "registered app {} ({}, {} endpoints, {} custom types)",
            app_name,
            abi.name,
            abi.endpoints.len(),
            abi.types.len()
        );
        self.apps.insert(
            app_name.to_string(),
            Arc::new(AppEntry {
                contract_address: contract_address.to_string(),
                abi,
                raw_abi,
            }),
        );
        Ok(())
    }

    pub fn lookup(&self, app_name: &str) -> Result<&Arc<AppEntry>, ApiError> {
        self.apps
            .get(app_name)
            .ok_or_else(|| ApiError::UnknownApp(app_name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<AppEntry>)> {
        self.apps.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

async fn load_abi(source: &str) -> Result<Value, ApiError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let mut res = awc::Client::default()
            .get(source)
            .send()
            .await
            .map_err(|e| ApiError::AbiLoad(format!("{source}: {e}")))?;
        let body = res
            .body()
            .limit(ABI_SIZE_LIMIT)
            .await
            .map_err(|e| ApiError::AbiLoad(format!("{source}: {e}")))?;
        serde_json::from_slice(&body).map_err(|e| ApiError::BadAbi(e.to_string()))
    } else {
        let text = std::fs::read_to_string(source)?;
        serde_json::from_str(&text).map_err(|e| ApiError::BadAbi(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_abi(name: &str) -> Value {
        json!({
            "name": name,
            "endpoints": [],
            "types": {}
        })
    }

    #[test]
    fn lookup_of_unregistered_app_fails() {
        let catalog = EndpointCatalog::default();
        assert!(matches!(
            catalog.lookup("ghost"),
            Err(ApiError::UnknownApp(_))
        ));
    }

    #[test]
    fn re_registration_overwrites() {
        let mut catalog = EndpointCatalog::default();
        catalog.insert("calc", "erd1aaa", minimal_abi("First")).unwrap();
        catalog.insert("calc", "erd1bbb", minimal_abi("Second")).unwrap();
        let entry = catalog.lookup("calc").unwrap();
        assert_eq!(entry.contract_address, "erd1bbb");
        assert_eq!(entry.abi.name, "Second");
        assert_eq!(catalog.iter().count(), 1);
    }

    #[test]
    fn rejects_malformed_abi() {
        let mut catalog = EndpointCatalog::default();
        let result = catalog.insert("calc", "erd1aaa", json!({"endpoints": []}));
        assert!(matches!(result, Err(ApiError::BadAbi(_))));
    }
}
