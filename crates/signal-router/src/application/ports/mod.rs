mod clock;
mod dataset_fetcher;

pub use clock::Clock;
pub use dataset_fetcher::{DatasetFetcher, EndpointTemplate, TICKER_PLACEHOLDER};
