pub mod auto_repository;
pub mod user_repository;

pub use auto_repository::AutoRepository;
pub use user_repository::UserRepository;
