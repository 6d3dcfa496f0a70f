pub mod connection;
pub mod entities;
pub mod errors;
pub mod repositories;

pub use errors::StoreError;
pub use repositories::{AutoRepository, UserRepository};
