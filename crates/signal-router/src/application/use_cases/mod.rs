mod route_ticker;

pub use route_ticker::{RouteTickerUseCase, SignalBundle, SignalEndpoints};
