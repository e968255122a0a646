//! Repository functions for the domain layer.

pub mod games;
pub mod leaderboard;
pub mod matches;
pub mod participants;
pub mod players;
