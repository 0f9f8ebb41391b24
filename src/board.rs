//! 象棋棋盘
//!
//! 10 行 x 9 列的棋子编码数组，只负责存取，不包含规则。

use crate::types::{kind_of, team_of, Color, PieceType, Position, EMPTY};
use std::fmt;

/// 行数
pub const ROWS: usize = 10;
/// 列数
pub const COLS: usize = 9;

/// 原始棋盘编码
pub type Grid = [[u8; COLS]; ROWS];

/// 列字母（记谱用）
pub const FILE_LETTERS: [char; COLS] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: Grid,
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    /// 空棋盘
    pub fn empty() -> Board {
        Board {
            squares: [[EMPTY; COLS]; ROWS],
        }
    }

    /// 从编码数组创建
    pub fn from_grid(grid: Grid) -> Board {
        Board { squares: grid }
    }

    /// 编码数组快照
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.squares
    }

    /// 获取某位置的编码，越界返回空格
    #[inline]
    pub fn get(&self, pos: Position) -> u8 {
        if !pos.is_valid() {
            return EMPTY;
        }
        self.squares[pos.row as usize][pos.col as usize]
    }

    /// 设置某位置的编码，越界忽略
    #[inline]
    pub fn set(&mut self, pos: Position, code: u8) {
        if pos.is_valid() {
            self.squares[pos.row as usize][pos.col as usize] = code;
        }
    }

    /// 检查位置是否有棋子
    #[inline]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos) != EMPTY
    }

    /// 某位置棋子所属阵营编号（空格为 0）
    #[inline]
    pub fn team_at(&self, pos: Position) -> u8 {
        team_of(self.get(pos))
    }

    /// 某位置棋子的类型编号（空格为 0）
    #[inline]
    pub fn kind_at(&self, pos: Position) -> u8 {
        kind_of(self.get(pos))
    }

    /// 两点之间（不含端点）直线上的棋子数
    ///
    /// 两点不在同一行或同一列时返回 None。
    pub fn count_between(&self, from: Position, to: Position) -> Option<usize> {
        if from.row == to.row {
            let (lo, hi) = (from.col.min(to.col), from.col.max(to.col));
            Some(
                ((lo + 1)..hi)
                    .filter(|&col| self.is_occupied(Position::new(from.row, col)))
                    .count(),
            )
        } else if from.col == to.col {
            let (lo, hi) = (from.row.min(to.row), from.row.max(to.row));
            Some(
                ((lo + 1)..hi)
                    .filter(|&row| self.is_occupied(Position::new(row, from.col)))
                    .count(),
            )
        } else {
            None
        }
    }

    /// 棋盘上是否存在某编码
    pub fn contains(&self, code: u8) -> bool {
        self.squares.iter().flatten().any(|&c| c == code)
    }

    /// 某方棋子数
    pub fn count_pieces(&self, color: Color) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|&&code| code != EMPTY && team_of(code) == color.number())
            .count()
    }
}

/// 单格显示：空格为 `.`，否则为阵营字母 + 类型字母
fn cell_glyph(code: u8) -> String {
    if code == EMPTY {
        return ".".to_string();
    }
    let team = match team_of(code) {
        1 => 'r',
        2 => 'b',
        _ => 'n',
    };
    let kind = PieceType::from_number(kind_of(code)).map_or('?', |pt| pt.glyph());
    format!("{}{}", team, kind)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for letter in FILE_LETTERS {
            write!(f, " {:<2}", letter)?;
        }
        writeln!(f)?;
        for (row, cells) in self.squares.iter().enumerate() {
            write!(f, "{:02}", ROWS - row)?;
            for &code in cells {
                write!(f, " {:<2}", cell_glyph(code))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut board = Board::empty();
        let pos = Position::new(9, 0);
        assert!(!board.is_occupied(pos));
        board.set(pos, 11);
        assert_eq!(board.get(pos), 11);
        assert_eq!(board.team_at(pos), 1);
        assert_eq!(board.kind_at(pos), 1);
        // 越界
        board.set(Position::new(10, 0), 11);
        assert_eq!(board.get(Position::new(10, 0)), EMPTY);
    }

    #[test]
    fn test_count_between() {
        let mut board = Board::empty();
        board.set(Position::new(5, 0), 26);
        board.set(Position::new(3, 0), 26);
        assert_eq!(board.count_between(Position::new(9, 0), Position::new(0, 0)), Some(2));
        assert_eq!(board.count_between(Position::new(9, 0), Position::new(4, 0)), Some(1));
        assert_eq!(board.count_between(Position::new(5, 0), Position::new(3, 0)), Some(0));
        assert_eq!(board.count_between(Position::new(9, 0), Position::new(8, 1)), None);

        board.set(Position::new(9, 4), 16);
        assert_eq!(board.count_between(Position::new(9, 1), Position::new(9, 7)), Some(1));
    }

    #[test]
    fn test_display() {
        let mut board = Board::empty();
        board.set(Position::new(0, 4), 27);
        board.set(Position::new(9, 4), 17);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].contains('A') && lines[0].contains('I'));
        assert!(lines[1].starts_with("10"));
        assert!(lines[1].contains("bK"));
        assert!(lines[10].starts_with("01"));
        assert!(lines[10].contains("rK"));
    }

    #[test]
    fn test_display_unknown_type() {
        let mut board = Board::empty();
        board.set(Position::new(4, 4), 9);
        assert!(board.to_string().contains("n?"));
    }
}
