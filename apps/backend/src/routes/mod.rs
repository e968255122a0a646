use actix_web::web;

pub mod games;
pub mod health;
pub mod leaderboard;
pub mod matches;
pub mod play;
pub mod solo;
pub mod stats;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// Each module registers its full paths, so tests can mount this one
/// function and exercise the same surface production serves.
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    matches::configure_routes(cfg);
    play::configure_routes(cfg);
    solo::configure_routes(cfg);
    games::configure_routes(cfg);
    leaderboard::configure_routes(cfg);
    stats::configure_routes(cfg);
}
