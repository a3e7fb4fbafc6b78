mod entities;
mod error;
mod response;

pub use entities::*;
pub use error::*;
pub use response::*;
