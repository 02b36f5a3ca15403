//! リクエストハンドラ
//!
//! トランスポートに依存しない同期処理。対局への操作はすべて
//! `MatchRegistry::with_match` 経由で対局ロックの内側で行う。

use rdraughts_core::notation::parse_square;
use rdraughts_core::{Color, Match};

use crate::error::ApiError;
use crate::protocol::{Request, Response, ResponseBody};
use crate::registry::MatchRegistry;

/// 1 リクエストを処理する
pub fn handle(registry: &MatchRegistry, request: Request) -> Response {
    match dispatch(registry, request) {
        Ok(body) => Response::ok(body),
        Err(err) => {
            tracing::debug!(status = err.status(), "request failed: {err}");
            Response::error(&err)
        }
    }
}

/// JSON 1 行を解析して処理する
pub fn handle_line(registry: &MatchRegistry, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(registry, request),
        Err(e) => Response::error(&ApiError::BadRequest(e.to_string())),
    }
}

fn dispatch(registry: &MatchRegistry, request: Request) -> Result<ResponseBody, ApiError> {
    match request {
        Request::NewMatch => {
            let match_id = registry.create()?;
            metrics::counter!("rdraughts_matches_created_total").increment(1);
            Ok(ResponseBody::Created {
                match_id,
                current_player: Match::FIRST_TO_MOVE,
            })
        }
        Request::List => Ok(ResponseBody::Matches {
            matches: registry.summaries(),
        }),
        Request::Board { match_id } => {
            let state = registry.with_match(match_id, |game| game.board_snapshot())?;
            Ok(ResponseBody::Board { match_id, state })
        }
        Request::Move {
            match_id,
            player,
            from,
            to,
        } => {
            let player: Color = player.parse().map_err(|e| ApiError::BadRequest(format!("{e}")))?;
            let from_sq = parse_square(&from)?;
            let to_sq = parse_square(&to)?;

            registry.with_match(match_id, |game| -> Result<ResponseBody, ApiError> {
                if player != game.current_color() {
                    return Err(ApiError::NotYourTurn(player));
                }
                let effect = game.try_move(from_sq, to_sq).inspect_err(|_| {
                    metrics::counter!("rdraughts_moves_total", "result" => "rejected").increment(1);
                })?;
                metrics::counter!("rdraughts_moves_total", "result" => "accepted").increment(1);
                if game.is_game_over() {
                    metrics::counter!("rdraughts_games_finished_total").increment(1);
                    tracing::info!(%match_id, winner = ?game.winner(), "game over");
                }
                Ok(ResponseBody::Moved {
                    match_id,
                    message: format!("Move made: {from} -> {to}"),
                    captured: effect.captured.map(|(sq, _)| sq.to_string()),
                    promoted: effect.promoted,
                    current_player: game.current_color(),
                    game_over: game.is_game_over(),
                    winner: game.winner(),
                })
            })?
        }
        Request::Info { match_id, piece } => {
            let sq = parse_square(&piece)?;
            registry.with_match(match_id, |game| -> Result<ResponseBody, ApiError> {
                let found = game.board().get_piece(sq).ok_or_else(|| ApiError::NoPiece(piece.clone()))?;
                let possible_moves = game.possible_moves_for_piece(sq).iter().map(|mv| mv.to.to_string()).collect();
                Ok(ResponseBody::Info {
                    match_id,
                    position: sq.to_string(),
                    color: found.color(),
                    is_king: found.is_king(),
                    possible_moves,
                })
            })?
        }
        Request::Reset { match_id } => {
            registry.reset(match_id)?;
            Ok(ResponseBody::Reset {
                match_id,
                message: "Game reset successfully".to_string(),
                current_player: Match::FIRST_TO_MOVE,
            })
        }
        Request::Close { match_id } => {
            if registry.remove(match_id) {
                Ok(ResponseBody::Closed { match_id })
            } else {
                Err(ApiError::UnknownMatch(match_id))
            }
        }
    }
}
