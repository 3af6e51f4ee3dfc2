pub mod clock;
pub mod config;
pub mod http_fetcher;

pub use clock::{FixedClock, SystemClock};
pub use config::{ConfigError, RouterConfig, ServerConfig, ServiceInfo, UpstreamConfig};
pub use http_fetcher::{FetchError, HttpDatasetFetcher};
