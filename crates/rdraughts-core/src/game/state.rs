use super::{MoveError, Player};
use crate::board::{Board, MoveEffect};
use crate::movegen::{MoveList, generate_moves};
use crate::types::json::{BoardStateJson, CellJson};
use crate::types::{Color, Move, Square};

/// 対局状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// 終局。`winner` は駒が無くなった側・指せる手が無い側の相手
    Over { winner: Option<Color> },
}

/// 対局
#[derive(Debug, Clone)]
pub struct Match {
    board: Board,
    /// `Color::index()` で引く（白 = player1、黒 = player2）
    players: [Player; Color::NUM],
    current: Color,
    status: GameStatus,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// 初手は黒
    pub const FIRST_TO_MOVE: Color = Color::Black;

    /// 未開始の対局（盤面は空）。`start_game` で初期配置になる
    pub fn new() -> Self {
        Match {
            board: Board::empty(),
            players: [Player::new(Color::White), Player::new(Color::Black)],
            current: Self::FIRST_TO_MOVE,
            status: GameStatus::InProgress,
        }
    }

    /// `new` + `start_game`
    pub fn started() -> Self {
        let mut m = Self::new();
        m.start_game();
        m
    }

    /// 任意局面から開始する。終局条件を満たす局面なら即座に終局扱い
    pub fn from_board(board: Board, to_move: Color) -> Self {
        let mut m = Match {
            board,
            players: [Player::new(Color::White), Player::new(Color::Black)],
            current: to_move,
            status: GameStatus::InProgress,
        };
        m.update_players_pieces();
        if let Some(winner) = m.evaluate_termination(to_move) {
            m.status = GameStatus::Over { winner: Some(winner) };
        }
        m
    }

    /// 盤面を初期配置にして駒一覧を作る
    pub fn start_game(&mut self) {
        self.board.reset();
        self.current = Self::FIRST_TO_MOVE;
        self.status = GameStatus::InProgress;
        self.update_players_pieces();
        log::debug!("game started, {} to move", self.current);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    #[inline]
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    #[inline]
    pub fn current_color(&self) -> Color {
        self.current
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::Over { .. })
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Over { winner } => winner,
            GameStatus::InProgress => None,
        }
    }

    /// 指し手を試みる。受理されたら true
    pub fn attempt_move(&mut self, from: Square, to: Square) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// 指し手を試み、受理されなかった場合はその理由を返す。
    /// 拒否時は盤面・手番・終局状態のいずれも変更しない。
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<MoveEffect, MoveError> {
        let result = self.try_move_inner(from, to);
        match &result {
            Ok(effect) => log::debug!("{} played {}", effect.piece.color(), effect.mv),
            Err(e) => log::debug!("rejected {from}-{to}: {e}"),
        }
        result
    }

    fn try_move_inner(&mut self, from: Square, to: Square) -> Result<MoveEffect, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self.board.get_piece(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color() != self.current {
            return Err(MoveError::NotYourTurn {
                piece: piece.color(),
                to_move: self.current,
            });
        }
        let effect = self.board.apply_move(from, to).ok_or(MoveError::IllegalMove(Move::new(from, to)))?;

        self.update_players_pieces();
        match self.evaluate_termination(!self.current) {
            Some(winner) => {
                self.status = GameStatus::Over { winner: Some(winner) };
                log::info!("game over: {winner} wins");
            }
            None => self.current = !self.current,
        }
        Ok(effect)
    }

    /// 手番側の駒の移動先。手番でない側の駒・空きマスは空リスト
    pub fn possible_moves_for_piece(&self, sq: Square) -> MoveList {
        match self.board.get_piece(sq) {
            Some(piece) if piece.color() == self.current => generate_moves(&self.board, sq),
            _ => MoveList::new(),
        }
    }

    /// フロントエンド向けの盤面スナップショット
    pub fn board_snapshot(&self) -> BoardStateJson {
        let board: Vec<Vec<Option<CellJson>>> = (0..Square::SIZE as i32)
            .map(|row| {
                (0..Square::SIZE as i32)
                    .map(|col| {
                        let sq = Square::new(row, col)?;
                        self.board.get_piece(sq).map(|piece| CellJson {
                            color: piece.color(),
                            is_king: piece.is_king(),
                            position: sq.to_string(),
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        BoardStateJson {
            board,
            current_player: self.current,
            game_over: self.is_game_over(),
            winner: self.winner(),
        }
    }

    /// 盤面を全走査して両者の駒一覧を作り直す
    fn update_players_pieces(&mut self) {
        for player in &mut self.players {
            player.refresh(&self.board);
        }
    }

    /// 終局判定。白の駒なし → 黒の駒なし → `to_move` に指せる手なし、の順。
    /// 終局なら勝者を返す。
    fn evaluate_termination(&self, to_move: Color) -> Option<Color> {
        if !self.player(Color::White).has_pieces() {
            return Some(Color::Black);
        }
        if !self.player(Color::Black).has_pieces() {
            return Some(Color::White);
        }
        if self.player(to_move).all_possible_moves(&self.board).is_empty() {
            return Some(!to_move);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_new_match_is_not_started() {
        let m = Match::new();
        assert_eq!(m.board().count(Color::White), 0);
        assert_eq!(m.current_color(), Color::Black);
        assert!(!m.is_game_over());
    }

    #[test]
    fn test_start_game_populates_rosters() {
        let m = Match::started();
        assert_eq!(m.player(Color::White).piece_count(), 12);
        assert_eq!(m.player(Color::Black).piece_count(), 12);
        assert_eq!(m.current_player().color(), Color::Black);
        assert_eq!(m.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_turn_alternates() {
        let mut m = Match::started();
        assert!(m.attempt_move(sq(2, 1), sq(3, 0)));
        assert_eq!(m.current_color(), Color::White);
        assert!(m.attempt_move(sq(5, 2), sq(4, 3)));
        assert_eq!(m.current_color(), Color::Black);
    }

    #[test]
    fn test_wrong_turn_rejected() {
        let mut m = Match::started();
        let before = m.board().clone();
        assert_eq!(
            m.try_move(sq(5, 0), sq(4, 1)),
            Err(MoveError::NotYourTurn {
                piece: Color::White,
                to_move: Color::Black
            })
        );
        assert_eq!(m.board(), &before);
        assert_eq!(m.current_color(), Color::Black);
    }

    #[test]
    fn test_no_piece_and_illegal_rejected() {
        let mut m = Match::started();
        assert_eq!(m.try_move(sq(3, 0), sq(4, 1)), Err(MoveError::NoPiece(sq(3, 0))));
        assert!(matches!(m.try_move(sq(2, 1), sq(4, 3)), Err(MoveError::IllegalMove(_))));
        assert_eq!(m.current_color(), Color::Black);
    }

    #[test]
    fn test_last_piece_captured_ends_game() {
        let mut board = Board::empty();
        board.set_piece(sq(4, 4), Piece::Man(Color::White));
        board.set_piece(sq(3, 3), Piece::Man(Color::Black));
        let mut m = Match::from_board(board, Color::White);
        assert!(!m.is_game_over());

        assert!(m.attempt_move(sq(4, 4), sq(2, 2)));
        assert!(m.is_game_over());
        assert_eq!(m.winner(), Some(Color::White));
        assert_eq!(m.player(Color::Black).piece_count(), 0);
        // 終局させた手では手番は交代しない
        assert_eq!(m.current_color(), Color::White);
    }

    #[test]
    fn test_blocked_opponent_loses() {
        // 黒の兵 (6,1) の前方 (7,0) (7,2) は白で埋まり、取りの着地点は盤外
        let mut board = Board::empty();
        board.set_piece(sq(6, 1), Piece::Man(Color::Black));
        board.set_piece(sq(7, 0), Piece::Man(Color::White));
        board.set_piece(sq(7, 2), Piece::Man(Color::White));
        board.set_piece(sq(4, 5), Piece::Man(Color::White));
        let mut m = Match::from_board(board, Color::White);
        assert!(!m.is_game_over());

        assert!(m.attempt_move(sq(4, 5), sq(3, 4)));
        assert!(m.is_game_over());
        assert_eq!(m.winner(), Some(Color::White));
    }

    #[test]
    fn test_game_over_is_absorbing() {
        let mut board = Board::empty();
        board.set_piece(sq(4, 4), Piece::Man(Color::White));
        board.set_piece(sq(3, 3), Piece::Man(Color::Black));
        board.set_piece(sq(6, 1), Piece::Man(Color::White));
        let mut m = Match::from_board(board, Color::White);
        assert!(m.attempt_move(sq(4, 4), sq(2, 2)));
        assert!(m.is_game_over());

        let before = m.board().clone();
        assert_eq!(m.try_move(sq(6, 1), sq(5, 0)), Err(MoveError::GameOver));
        assert_eq!(m.board(), &before);
    }

    #[test]
    fn test_from_board_detects_terminal_position() {
        let mut board = Board::empty();
        board.set_piece(sq(5, 0), Piece::Man(Color::White));
        let m = Match::from_board(board, Color::White);
        assert!(m.is_game_over());
        assert_eq!(m.winner(), Some(Color::White));
    }

    #[test]
    fn test_possible_moves_only_for_side_to_move() {
        let m = Match::started();
        assert_eq!(m.possible_moves_for_piece(sq(2, 1)).len(), 2);
        assert!(m.possible_moves_for_piece(sq(5, 0)).is_empty());
        assert!(m.possible_moves_for_piece(sq(4, 1)).is_empty());
    }

    #[test]
    fn test_board_snapshot() {
        let mut m = Match::started();
        assert!(m.attempt_move(sq(2, 1), sq(3, 0)));
        let snap = m.board_snapshot();
        assert_eq!(snap.board.len(), 8);
        assert!(snap.board.iter().all(|row| row.len() == 8));
        assert_eq!(snap.current_player, Color::White);
        assert!(!snap.game_over);
        assert_eq!(snap.winner, None);

        let cell = snap.board[3][0].as_ref().unwrap();
        assert_eq!(cell.color, Color::Black);
        assert!(!cell.is_king);
        assert_eq!(cell.position, "A5");
        assert!(snap.board[2][1].is_none());
        assert!(snap.board[0][0].is_none());
    }

    #[test]
    fn test_rosters_track_board_after_capture() {
        let mut m = Match::started();
        // 黒 B6-C5, 白 E3-F4, 黒 C5-D4, 白 C3xE5
        assert!(m.attempt_move(sq(2, 1), sq(3, 2)));
        assert!(m.attempt_move(sq(5, 4), sq(4, 5)));
        assert!(m.attempt_move(sq(3, 2), sq(4, 3)));
        assert!(m.attempt_move(sq(5, 2), sq(3, 4)));
        assert_eq!(m.player(Color::Black).piece_count(), 11);
        for color in Color::ALL {
            let expected: Vec<Square> = m.board().pieces(color).map(|(s, _)| s).collect();
            assert_eq!(m.player(color).pieces(), expected.as_slice());
        }
    }
}
