//! SeaORM adapters. Functions here return `DbErr`; the repos layer maps
//! to `DomainError` via `From<DbErr>`.

pub mod games_sea;
pub mod leaderboard_sea;
pub mod match_players_sea;
pub mod matches_sea;
pub mod players_sea;
