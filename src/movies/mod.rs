pub mod gateway;
pub mod handlers;
pub mod types;

pub use gateway::{interpret_response, LookupError, MovieLookup, OmdbClient};
pub use handlers::*;
pub use types::*;
