use rdraughts_core::notation::NotationError;
use rdraughts_core::{Color, MoveError};

use crate::registry::MatchId;

/// API エラー
///
/// フロントエンドが HTTP ステータス相当の値に写像できるよう `status()` を持つ。
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("not {0}'s turn")]
    NotYourTurn(Color),

    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),

    #[error("no piece at position {0}")]
    NoPiece(String),

    #[error("unknown match {0}")]
    UnknownMatch(MatchId),

    #[error("match limit reached ({0})")]
    RegistryFull(usize),
}

impl ApiError {
    /// HTTP ステータス相当のコード
    pub fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_)
            | ApiError::Notation(_)
            | ApiError::NotYourTurn(_)
            | ApiError::InvalidMove(_) => 400,
            ApiError::NoPiece(_) | ApiError::UnknownMatch(_) => 404,
            ApiError::RegistryFull(_) => 503,
        }
    }
}
