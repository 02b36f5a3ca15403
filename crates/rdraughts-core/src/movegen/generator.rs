use smallvec::SmallVec;

use crate::board::Board;
use crate::types::{Color, Move, Piece, Square};

/// 1 駒分の指し手リスト（王でも最大 13 手）
pub type MoveList = SmallVec<[Move; 16]>;

/// 斜め 4 方向
const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// `from` にある駒の移動先を生成する。空きマスなら空リスト
pub fn generate_moves(board: &Board, from: Square) -> MoveList {
    match board.get_piece(from) {
        Some(Piece::Man(color)) => man_moves(board, from, color),
        Some(Piece::King(color)) => king_moves(board, from, color),
        None => MoveList::new(),
    }
}

/// 指定色の全駒の指し手の和集合
pub fn generate_all(board: &Board, color: Color) -> Vec<Move> {
    board.pieces(color).flat_map(|(sq, _)| generate_moves(board, sq)).collect()
}

/// 兵: 前方 2 方向のみ。取りも前方のみで、後退取りは生成しない
pub fn man_moves(board: &Board, from: Square, color: Color) -> MoveList {
    let dr = color.forward();
    let mut moves = MoveList::new();

    for dc in [-1, 1] {
        if let Some(to) = from.offset(dr, dc) {
            if board.is_empty(to) {
                moves.push(Move::new(from, to));
            }
        }
    }

    for dc in [-1, 1] {
        let Some(over) = from.offset(dr, dc) else { continue };
        let Some(landing) = from.offset(2 * dr, 2 * dc) else { continue };
        let is_opponent = board.get_piece(over).is_some_and(|p| p.color() != color);
        if is_opponent && board.is_empty(landing) {
            moves.push(Move::new(from, landing));
        }
    }

    moves
}

/// 王: 斜め 4 方向に空きマスが続く限り進める。
/// 最初に当たった駒が相手駒で、その直後が空きなら取りとしてそこへ着地できる。
/// いずれの場合もその方向の走査はそこで終わる。
pub fn king_moves(board: &Board, from: Square, color: Color) -> MoveList {
    let mut moves = MoveList::new();

    for (dr, dc) in DIAGONALS {
        let mut cur = from;
        while let Some(next) = cur.offset(dr, dc) {
            match board.get_piece(next) {
                None => {
                    moves.push(Move::new(from, next));
                    cur = next;
                }
                Some(blocker) => {
                    if blocker.color() != color {
                        if let Some(landing) = next.offset(dr, dc).filter(|&l| board.is_empty(l)) {
                            moves.push(Move::new(from, landing));
                        }
                    }
                    break;
                }
            }
        }
    }

    moves
}
