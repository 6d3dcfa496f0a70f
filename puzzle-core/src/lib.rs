pub mod leaderboard;
pub mod progress;
pub mod validation;

// Re-export main components
pub use leaderboard::*;
pub use progress::*;
pub use validation::*;
