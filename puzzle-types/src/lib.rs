pub mod auto;
pub mod errors;
pub mod progress;
pub mod user;

// Re-export all types
pub use auto::*;
pub use errors::*;
pub use progress::*;
pub use user::*;
