//! 走法记谱解析和生成
//!
//! 格式：`<起点段位><起点列><终点段位><终点列>`，固定 6 个字符，例如 `03H03E`。
//!
//! - 段位：两位数字 01-10，10 在棋盘最上方（黑方底线）
//! - 列：字母 A-I，不区分大小写
//!
//! 段位 `r` 对应内部行号 `10 - r`，字母 `L` 对应列号 `L - 'A'`。

use crate::types::Position;
use std::fmt;
use thiserror::Error;

/// 记谱长度
pub const NOTATION_LEN: usize = 6;

/// 记谱解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// 长度不对，或段位不是数字
    #[error("malformed notation {0:?}")]
    Format(String),
    /// 解析出的行列超出棋盘
    #[error("notation {notation:?} is off the board at row {row}, col {col}")]
    Range { notation: String, row: i32, col: i32 },
}

/// 走法（起点和终点，均为内部 0 起始索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }

    /// 行偏移
    #[inline]
    pub fn row_delta(&self) -> i8 {
        self.to.row - self.from.row
    }

    /// 列偏移
    #[inline]
    pub fn col_delta(&self) -> i8 {
        self.to.col - self.from.col
    }

    /// 从记谱解析
    pub fn parse(notation: &str) -> Result<Move, NotationError> {
        parse(notation)
    }

    /// 转换为记谱
    pub fn to_notation(&self) -> String {
        format(self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format(self))
    }
}

/// 解析记谱字符串
pub fn parse(notation: &str) -> Result<Move, NotationError> {
    let chars: Vec<char> = notation.chars().collect();
    if chars.len() != NOTATION_LEN {
        return Err(NotationError::Format(notation.to_string()));
    }

    let start_row = parse_rank(&chars[0..2])
        .ok_or_else(|| NotationError::Format(notation.to_string()))?;
    let start_col = file_index(chars[2]);
    let end_row = parse_rank(&chars[3..5])
        .ok_or_else(|| NotationError::Format(notation.to_string()))?;
    let end_col = file_index(chars[5]);

    for (row, col) in [(start_row, start_col), (end_row, end_col)] {
        if !(0..=9).contains(&row) || !(0..=8).contains(&col) {
            return Err(NotationError::Range {
                notation: notation.to_string(),
                row,
                col,
            });
        }
    }

    Ok(Move {
        from: Position::new(start_row as i8, start_col as i8),
        to: Position::new(end_row as i8, end_col as i8),
    })
}

/// 生成记谱字符串（段位补零，列字母大写）
pub fn format(mv: &Move) -> String {
    format!(
        "{:02}{}{:02}{}",
        10 - mv.from.row as i32,
        file_char(mv.from.col),
        10 - mv.to.row as i32,
        file_char(mv.to.col)
    )
}

/// 两位段位 -> 内部行号
fn parse_rank(digits: &[char]) -> Option<i32> {
    let mut rank = 0i32;
    for ch in digits {
        rank = rank * 10 + ch.to_digit(10)? as i32;
    }
    Some(10 - rank)
}

/// 列字母 -> 列号（非 A-I 的字符会落在范围外）
fn file_index(ch: char) -> i32 {
    let upper = ch.to_ascii_uppercase();
    upper as i32 - 'A' as i32
}

fn file_char(col: i8) -> char {
    (b'A' + col as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let mv = parse("03H03E").unwrap();
        assert_eq!(mv.from, Position::new(7, 7));
        assert_eq!(mv.to, Position::new(7, 4));
    }

    #[test]
    fn test_parse_extremes() {
        let mv = parse("10A01I").unwrap();
        assert_eq!(mv.from, Position::new(0, 0));
        assert_eq!(mv.to, Position::new(9, 8));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(parse("01a02a").unwrap(), parse("01A02A").unwrap());
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(parse("03H03"), Err(NotationError::Format(_))));
        assert!(matches!(parse("03H03EE"), Err(NotationError::Format(_))));
        assert!(matches!(parse(""), Err(NotationError::Format(_))));
    }

    #[test]
    fn test_parse_non_numeric() {
        assert!(matches!(parse("0xH03E"), Err(NotationError::Format(_))));
        assert!(matches!(parse("03H-3E"), Err(NotationError::Format(_))));
    }

    #[test]
    fn test_parse_out_of_range() {
        // 段位 00 -> 行 10
        assert!(matches!(parse("00A01A"), Err(NotationError::Range { .. })));
        // 段位 11 -> 行 -1
        assert!(matches!(parse("11A01A"), Err(NotationError::Range { .. })));
        // 列 J -> 9
        assert!(matches!(parse("01J01A"), Err(NotationError::Range { .. })));
        assert!(matches!(parse("01A01#"), Err(NotationError::Range { .. })));
    }

    #[test]
    fn test_format() {
        let mv = Move::new(Position::new(7, 7), Position::new(7, 4));
        assert_eq!(format(&mv), "03H03E");
        let mv = Move::new(Position::new(0, 0), Position::new(9, 8));
        assert_eq!(mv.to_string(), "10A01I");
    }

    #[test]
    fn test_format_normalizes_case() {
        let mv = parse("03h03e").unwrap();
        assert_eq!(mv.to_notation(), "03H03E");
    }
}
