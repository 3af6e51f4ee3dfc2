use serde::{Deserialize, Serialize};

/// Query string of `GET /route`
#[derive(Debug, Clone, Deserialize)]
pub struct RouteQuery {
    #[serde(default)]
    pub ticker: Option<String>,
}

/// Example paths advertised by `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct EndpointsInfo {
    pub route: String,
    pub health: String,
}

/// Service metadata (`GET /`)
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfoResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: EndpointsInfo,
    pub sigmagrid_docs: String,
}

/// Health check (`GET /health`)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub time: String,
}

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub msg: String,
}

impl ErrorResponse {
    pub fn new(code: i32, msg: impl Into<String>) -> Self {
        ErrorResponse {
            code,
            msg: msg.into(),
        }
    }
}
