//! An HTTP service listing the non-fork GitHub repositories of a user along with their branches.

mod infrastructure;
mod interface;
mod model;

pub use infrastructure::*;
pub use interface::*;
pub use model::*;
