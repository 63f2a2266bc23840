pub mod path;

mod resolve;
mod schema;
mod types;

pub use schema::*;
pub use types::*;
