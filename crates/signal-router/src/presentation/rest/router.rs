use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::application::{Clock, DatasetFetcher, RouteTickerUseCase, SignalEndpoints};
use crate::infrastructure::ServiceInfo;

/// Application state shared across handlers
pub struct AppState<F: DatasetFetcher, C: Clock> {
    pub route_use_case: RouteTickerUseCase<F, C>,
    pub clock: Arc<C>,
    pub service: ServiceInfo,
    pub docs_url: String,
}

impl<F: DatasetFetcher, C: Clock> AppState<F, C> {
    pub fn new(
        fetcher: Arc<F>,
        clock: Arc<C>,
        endpoints: SignalEndpoints,
        service: ServiceInfo,
        docs_url: impl Into<String>,
    ) -> Self {
        AppState {
            route_use_case: RouteTickerUseCase::new(fetcher, Arc::clone(&clock), endpoints),
            clock,
            service,
            docs_url: docs_url.into(),
        }
    }
}

/// Create the REST API router
pub fn create_router<F, C>(state: Arc<AppState<F, C>>) -> Router
where
    F: DatasetFetcher + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/", get(handlers::root::<F, C>))
        .route("/health", get(handlers::health::<F, C>))
        .route("/route", get(handlers::route::<F, C>))
        .fallback(handlers::not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
