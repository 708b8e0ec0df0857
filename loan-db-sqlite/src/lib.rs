//! SQLite backend for the loan application store.

mod factory;
mod repository;

pub use factory::{SqliteRepositoryFactory, connection_url};
pub use repository::SqliteRepository;
