use axum::{
    Json,
    extract::{Query, State},
    http::Uri,
};
use std::sync::Arc;

use crate::application::{Clock, DatasetFetcher};
use crate::domain::{RoutingDecision, Ticker};
use crate::presentation::rest::{ApiError, dto::*};
use router_core::iso_utc;

use super::AppState;

/// GET /
pub async fn root<F: DatasetFetcher, C: Clock>(
    State(state): State<Arc<AppState<F, C>>>,
) -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        name: state.service.name.clone(),
        version: state.service.version.clone(),
        description: state.service.description.clone(),
        endpoints: EndpointsInfo {
            route: "/route?ticker=TSLA".to_string(),
            health: "/health".to_string(),
        },
        sigmagrid_docs: state.docs_url.clone(),
    })
}

/// GET /health
pub async fn health<F: DatasetFetcher, C: Clock>(
    State(state): State<Arc<AppState<F, C>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.service.health_name.clone(),
        time: iso_utc(&state.clock.now()),
    })
}

/// GET /route?ticker=SYMBOL
///
/// Always 200 once `ticker` is present, even blank; upstream trouble shows up as
/// `action: "error"`.
pub async fn route<F: DatasetFetcher, C: Clock>(
    State(state): State<Arc<AppState<F, C>>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RoutingDecision>, ApiError> {
    let ticker = query
        .ticker
        .map(Ticker::new)
        .ok_or_else(|| ApiError::missing_parameter("ticker"))?;

    Ok(Json(state.route_use_case.execute(&ticker).await))
}

/// Any unknown path
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
