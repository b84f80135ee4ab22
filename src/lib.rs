pub mod catalog;
pub mod config;
pub mod entities;
pub mod error;
pub mod events;
pub mod map;
pub mod store;
pub mod tickets;
pub mod utils;
pub mod wizard;

pub use config::Config;
pub use error::{AppError, AppResult};

use store::Store;

pub struct AppState<S: Store> {
    pub store: S,
    pub config: Config,
}
