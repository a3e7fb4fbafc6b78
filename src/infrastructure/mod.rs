mod aggregator_parallel;
mod aggregator_sequential;
mod fetcher_rest;
mod server_http;

pub use aggregator_parallel::*;
pub use aggregator_sequential::*;
pub use fetcher_rest::*;
pub use server_http::*;
