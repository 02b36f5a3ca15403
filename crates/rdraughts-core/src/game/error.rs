use crate::types::{Color, Move, Square};

/// 指し手が受理されなかった理由
///
/// 外部向けの契約は `Match::attempt_move` の bool のみで、この型はログと
/// フロントエンドの表示用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error("no piece at {0}")]
    NoPiece(Square),

    #[error("not {piece}'s turn ({to_move} to move)")]
    NotYourTurn { piece: Color, to_move: Color },

    #[error("illegal move {0}")]
    IllegalMove(Move),
}
