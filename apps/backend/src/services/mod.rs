//! Business logic services.

pub mod leaderboard;
pub mod match_flow;
pub mod solo;
pub mod stats;
