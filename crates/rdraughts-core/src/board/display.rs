use std::fmt;

use super::Board;
use crate::types::Square;

const FILES: &str = "  A B C D E F G H";

/// コンソール向けの盤面図（8 段目が上）
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FILES}")?;
        for row in 0..Square::SIZE {
            let rank = Square::SIZE - row;
            write!(f, "{rank} ")?;
            for col in 0..Square::SIZE {
                let cell = match self.piece_at(row as i32, col as i32) {
                    _ if (row + col) % 2 == 0 => '□',
                    Some(piece) => piece.symbol(),
                    None => '■',
                };
                write!(f, "{cell} ")?;
            }
            writeln!(f, " {rank}")?;
        }
        write!(f, "{FILES}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_startpos() {
        let text = Board::startpos().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], FILES);
        assert_eq!(lines[1], "8 □ ● □ ● □ ● □ ●  8");
        assert_eq!(lines[4], "5 ■ □ ■ □ ■ □ ■ □  5");
        assert_eq!(lines[8], "1 ○ □ ○ □ ○ □ ○ □  1");
        assert_eq!(lines[9], FILES);
    }
}
