use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// Error states of the API layer.
///
/// Schema resolution never errors (bad types degrade to Unknown nodes in
/// the document), so everything here is about catalog lookups, loading and
/// the external executor.
#[derive(Debug)]
pub enum ApiError {
    UnknownApp(String),
    UnknownEndpoint { app: String, endpoint: String },
    AbiLoad(String),
    BadAbi(String),
    BadConfig(String),
    ExecutorUnreachable(String),
    /// Non-200 executor response, status and payload pass through to the
    /// caller unchanged.
    ExecutorFailure { status: u16, payload: Value },
    Io(std::io::Error),
}

impl From<std::io::Error> for ApiError {
    fn from(error: std::io::Error) -> Self {
        ApiError::Io(error)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ApiError::UnknownApp(app) => write!(f, "No app registered under name {app}"),
            ApiError::UnknownEndpoint { app, endpoint } => {
                write!(f, "App {app} has no readonly endpoint {endpoint}")
            }
            ApiError::AbiLoad(val) => write!(f, "Failed to load ABI {val}"),
            ApiError::BadAbi(val) => write!(f, "Failed to parse ABI JSON {val}"),
            ApiError::BadConfig(val) => write!(f, "Failed to parse config {val}"),
            ApiError::ExecutorUnreachable(val) => {
                write!(f, "Failed to reach the execution service {val}")
            }
            ApiError::ExecutorFailure { status, payload } => {
                write!(f, "Execution service returned status {status}: {payload}")
            }
            ApiError::Io(val) => write!(f, "Io error {val}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Io(inner) => Some(inner),
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnknownApp(_) | ApiError::UnknownEndpoint { .. } => StatusCode::NOT_FOUND,
            ApiError::ExecutorFailure { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::ExecutorUnreachable(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            // the executor payload passes through verbatim
            ApiError::ExecutorFailure { payload, .. } => json!({ "error": payload }),
            other => json!({ "error": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[test]
fn executor_failure_keeps_status_and_payload() {
    let err = ApiError::ExecutorFailure {
        status: 400,
        payload: json!({"returnMessage": "storage decode error"}),
    };
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn lookups_map_to_not_found() {
    assert_eq!(
        ApiError::UnknownApp("nope".to_string()).status_code(),
        StatusCode::NOT_FOUND
    );
    let err = ApiError::UnknownEndpoint {
        app: "calc".to_string(),
        endpoint: "getNothing".to_string(),
    };
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        err.to_string(),
        "App calc has no readonly endpoint getNothing"
    );
}
