//! メニュー形式のコンソール対局
//!
//! - `1`: 駒を動かす（移動元・移動先を順に入力）
//! - `2`: 駒の情報と移動先
//! - `3`: 盤面表示
//! - `4`: 終了
//! - `help`: ヘルプ
//!
//! メニューの代わりに "A3-B4" のように直接指し手を入力してもよい。

use std::io::{self, BufRead, Write};

use rdraughts_core::notation::{parse_move, parse_square};
use rdraughts_core::{Color, Match, Square};

const HELP: &str = "\
=== COMMANDS ===
1 - Move a piece
2 - Show piece details
3 - Show current board
4 - Leave the game
Help - Display this help

Move format: A1-H8 (ex: A1, B2, etc.)
You can also type a move directly, e.g. B6-A5
===============================";

/// セッションの終わり方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    GameOver { winner: Option<Color> },
    Quit,
    EndOfInput,
}

pub struct Console<R, W> {
    input: R,
    output: W,
    game: Match,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::with_match(input, output, Match::started())
    }

    /// 任意の対局から始める
    pub fn with_match(input: R, output: W, game: Match) -> Self {
        Console { input, output, game }
    }

    pub fn game(&self) -> &Match {
        &self.game
    }

    /// 終局・終了・入力終端のいずれかまで対話を続ける
    pub fn run(&mut self) -> io::Result<SessionEnd> {
        writeln!(self.output, "=== CHECKERS ===")?;
        writeln!(self.output, "Welcome To Checkers!")?;
        writeln!(self.output, "\n{HELP}\n")?;

        while !self.game.is_game_over() {
            writeln!(self.output, "\nPlayer's turn: {}", self.game.current_color())?;
            writeln!(self.output, "{}", self.game.board())?;
            writeln!(self.output, "\nWhat would you like to do?")?;

            let Some(choice) = self.prompt("Your Choice: ")? else {
                return Ok(SessionEnd::EndOfInput);
            };

            let flow = match choice.as_str() {
                "1" => self.move_command()?,
                "2" => self.info_command()?,
                "3" => {
                    writeln!(self.output, "\nCurrent board:\n{}", self.game.board())?;
                    Some(())
                }
                "4" => {
                    writeln!(self.output, "Ciao!")?;
                    return Ok(SessionEnd::Quit);
                }
                c if c.eq_ignore_ascii_case("help") => {
                    writeln!(self.output, "\n{HELP}\n")?;
                    Some(())
                }
                c => match parse_move(c) {
                    Ok(mv) => {
                        self.play(mv.from, mv.to)?;
                        Some(())
                    }
                    Err(_) => {
                        writeln!(self.output, "Invalid choice! Select Help for help.")?;
                        Some(())
                    }
                },
            };
            if flow.is_none() {
                return Ok(SessionEnd::EndOfInput);
            }
        }

        let winner = self.game.winner();
        writeln!(self.output, "\n=== END OF GAME ===")?;
        if let Some(color) = winner {
            writeln!(self.output, "Winner: {color}")?;
        }
        writeln!(self.output, "{}", self.game.board())?;
        Ok(SessionEnd::GameOver { winner })
    }

    /// 入力終端なら `None`
    fn move_command(&mut self) -> io::Result<Option<()>> {
        writeln!(self.output, "Piece Movement")?;
        let Some(from) = self.prompt("Start position (ex: A1): ")? else {
            return Ok(None);
        };
        let Some(to) = self.prompt("End position (ex: B2): ")? else {
            return Ok(None);
        };

        match (parse_square(&from), parse_square(&to)) {
            (Ok(from), Ok(to)) => self.play(from, to)?,
            _ => writeln!(self.output, "Invalid Position! Use format A1-H8")?,
        }
        Ok(Some(()))
    }

    fn info_command(&mut self) -> io::Result<Option<()>> {
        let Some(text) = self.prompt("Piece position (ex: A1): ")? else {
            return Ok(None);
        };
        let Ok(sq) = parse_square(&text) else {
            writeln!(self.output, "Invalid Position! Use format A1-H8")?;
            return Ok(Some(()));
        };

        let Some(piece) = self.game.board().get_piece(sq) else {
            writeln!(self.output, "No piece in {sq}")?;
            return Ok(Some(()));
        };
        let kind = if piece.is_king() { "(King)" } else { "(Man)" };
        writeln!(self.output, "Piece in {sq}: {} {kind}", piece.color())?;

        let moves = self.game.possible_moves_for_piece(sq);
        if moves.is_empty() {
            writeln!(self.output, "No movements available for this piece.")?;
        } else {
            writeln!(self.output, "Possible Movements:")?;
            for mv in &moves {
                writeln!(self.output, "  -> {}", mv.to)?;
            }
        }
        Ok(Some(()))
    }

    fn play(&mut self, from: Square, to: Square) -> io::Result<()> {
        match self.game.try_move(from, to) {
            Ok(effect) => {
                writeln!(self.output, "movement done: {from} -> {to}")?;
                if let Some((sq, _)) = effect.captured {
                    writeln!(self.output, "captured piece on {sq}")?;
                }
                if effect.promoted {
                    writeln!(self.output, "promoted to King on {to}")?;
                }
            }
            Err(e) => {
                log::debug!("move rejected: {e}");
                writeln!(self.output, "Invalid Movement! ({e})")?;
            }
        }
        Ok(())
    }

    /// プロンプトを表示して 1 行読む。入力終端なら `None`
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdraughts_core::{Board, Piece};
    use std::io::Cursor;

    fn run_script(script: &str) -> (SessionEnd, String, Match) {
        let mut out = Vec::new();
        let mut console = Console::new(Cursor::new(script.to_string()), &mut out);
        let end = console.run().unwrap();
        let game = console.game().clone();
        (end, String::from_utf8(out).unwrap(), game)
    }

    #[test]
    fn test_quit() {
        let (end, out, _) = run_script("4\n");
        assert_eq!(end, SessionEnd::Quit);
        assert!(out.contains("Welcome To Checkers!"));
        assert!(out.contains("Player's turn: black"));
        assert!(out.contains("Ciao!"));
    }

    #[test]
    fn test_end_of_input() {
        let (end, _, _) = run_script("");
        assert_eq!(end, SessionEnd::EndOfInput);
        let (end, _, _) = run_script("1\nB6\n");
        assert_eq!(end, SessionEnd::EndOfInput);
    }

    #[test]
    fn test_move_via_menu_and_direct() {
        let (_, out, game) = run_script("1\nB6\nA5\nE3-F4\n4\n");
        assert!(out.contains("movement done: B6 -> A5"));
        assert!(out.contains("movement done: E3 -> F4"));
        assert_eq!(game.current_color(), Color::Black);
    }

    #[test]
    fn test_invalid_inputs() {
        let (_, out, game) = run_script("1\nZ9\nA5\n1\nA3\nB4\nxyz\nhelp\n4\n");
        assert!(out.contains("Invalid Position! Use format A1-H8"));
        assert!(out.contains("Invalid Movement! (not white's turn (black to move))"));
        assert!(out.contains("Invalid choice! Select Help for help."));
        assert_eq!(out.matches("=== COMMANDS ===").count(), 2);
        assert_eq!(game.current_color(), Color::Black);
    }

    #[test]
    fn test_piece_details() {
        let (_, out, _) = run_script("2\nB6\n2\nA3\n2\nD4\n4\n");
        assert!(out.contains("Piece in B6: black (Man)"));
        assert!(out.contains("  -> A5"));
        assert!(out.contains("  -> C5"));
        assert!(out.contains("Piece in A3: white (Man)"));
        assert!(out.contains("No movements available for this piece."));
        assert!(out.contains("No piece in D4"));
    }

    #[test]
    fn test_game_over_summary() {
        let mut board = Board::empty();
        board.set_piece(parse_square("E4").unwrap(), Piece::Man(Color::White));
        board.set_piece(parse_square("D5").unwrap(), Piece::Man(Color::Black));
        let game = Match::from_board(board, Color::White);

        let mut out = Vec::new();
        let mut console = Console::with_match(Cursor::new("E4-C6\n"), &mut out, game);
        let end = console.run().unwrap();
        assert_eq!(end, SessionEnd::GameOver { winner: Some(Color::White) });
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("captured piece on D5"));
        assert!(out.contains("=== END OF GAME ==="));
        assert!(out.contains("Winner: white"));
    }
}
