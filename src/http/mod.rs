pub mod fetcher;
pub mod logging_middleware;
