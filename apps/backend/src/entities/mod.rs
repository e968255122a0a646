pub mod games;
pub mod leaderboard;
pub mod match_players;
pub mod matches;
pub mod players;

pub use games::Entity as Games;
pub use games::Model as Game;
pub use leaderboard::Entity as Leaderboard;
pub use leaderboard::Model as LeaderboardRow;
pub use match_players::Entity as MatchPlayers;
pub use match_players::Model as MatchPlayer;
pub use matches::Entity as Matches;
pub use matches::Model as MatchRow;
pub use players::Entity as Players;
pub use players::Model as Player;
