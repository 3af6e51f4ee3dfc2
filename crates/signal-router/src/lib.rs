//! Signal Router
//!
//! An agent that consumes the SigmaGrid signal API and turns its feeds into a
//! long / short / neutral routing suggestion for a ticker.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture with clear separation of concerns:
//!
//! - **Domain**: The routing rules (`decide`) over provider datasets
//! - **Application**: Ports (`DatasetFetcher`, `Clock`) and the `RouteTickerUseCase`
//! - **Infrastructure**: reqwest-backed fetcher, clocks, JSON configuration
//! - **Presentation**: REST API (`/`, `/health`, `/route`)
//!
//! # Request flow
//!
//! `GET /route?ticker=SPY` fetches the free signals feed and the two priced
//! feeds (fair value, spread) concurrently, waits for all three, applies the
//! rules and returns the decision. A feed that is paywalled (HTTP 402), empty
//! (`{"status":"no_data"}`), retired (HTTP 410) or failing is simply absent.
//!
//! # Example
//!
//! ```ignore
//! use signal_router::{RouterConfig, SignalRouter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let router = SignalRouter::new(RouterConfig::default())?;
//!     router.run().await
//! }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::{
    Clock, DatasetFetcher, EndpointTemplate, RouteTickerUseCase, SignalBundle, SignalEndpoints,
};
pub use domain::{Action, Decision, RoutingDecision, SignalDataset, Ticker, decide};
pub use infrastructure::{
    ConfigError, FetchError, FixedClock, HttpDatasetFetcher, RouterConfig, SystemClock,
};
pub use presentation::{AppState, create_router};

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// The routing agent server
pub struct SignalRouter<F: DatasetFetcher + 'static, C: Clock + 'static> {
    pub config: RouterConfig,
    pub fetcher: Arc<F>,
    pub clock: Arc<C>,
}

impl<F: DatasetFetcher + 'static, C: Clock + 'static> SignalRouter<F, C> {
    /// Create a router with explicit fetcher and clock
    pub fn with_parts(config: RouterConfig, fetcher: Arc<F>, clock: Arc<C>) -> Self {
        SignalRouter {
            config,
            fetcher,
            clock,
        }
    }

    /// Create the REST API router
    pub fn rest_router(&self) -> Router {
        let state = Arc::new(AppState::new(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.clock),
            self.config.upstream.endpoints.clone(),
            self.config.service.clone(),
            self.config.upstream.docs_url.clone(),
        ));

        create_router(state)
    }

    /// Bind and serve until the process is stopped
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.bind_addr();
        let router = self.rest_router();

        tracing::info!("Signal router listening on {}", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

impl SignalRouter<HttpDatasetFetcher, SystemClock> {
    /// Create a router talking to the configured upstream with the wall clock
    pub fn new(config: RouterConfig) -> Result<Self, FetchError> {
        let fetcher = HttpDatasetFetcher::new(&config.upstream.base_url, config.upstream.timeout())?;
        Ok(Self::with_parts(
            config,
            Arc::new(fetcher),
            Arc::new(SystemClock::new()),
        ))
    }
}
