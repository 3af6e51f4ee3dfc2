pub mod ports;
pub mod use_cases;

pub use ports::{Clock, DatasetFetcher, EndpointTemplate};
pub use use_cases::{RouteTickerUseCase, SignalBundle, SignalEndpoints};
