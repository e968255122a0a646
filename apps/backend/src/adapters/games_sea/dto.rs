/// Insert payload for an archived game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub player1_name: String,
    pub player2_name: String,
    pub player1_move: String,
    pub player2_move: String,
    pub winner: Option<String>,
}
