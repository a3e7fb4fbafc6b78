mod aggregator;
mod fetcher;

pub use aggregator::*;
pub use fetcher::*;
