pub mod handlers;
pub mod model;
pub mod persist;
pub mod store;

pub use handlers::*;
pub use model::{MovieRecord, NO_POSTER};
pub use persist::{FavoritesBackend, JsonFileBackend, PersistError, FAVORITES_FILE};
pub use store::{FavoritesError, FavoritesStore};
