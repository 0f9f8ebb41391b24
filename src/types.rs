//! 象棋核心类型定义
//!
//! 棋子编码：`code = team * 10 + type`，`0` 表示空格。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 空格编码
pub const EMPTY: u8 = 0;

/// 棋子颜色/阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// 先手（红方），编号 1
    Red,
    /// 后手（黑方），编号 2
    Black,
}

impl Color {
    /// 获取对方阵营
    pub fn opposite(&self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// 阵营编号
    pub fn number(&self) -> u8 {
        match self {
            Color::Red => 1,
            Color::Black => 2,
        }
    }

    /// 从阵营编号解析
    pub fn from_number(n: u8) -> Option<Color> {
        match n {
            1 => Some(Color::Red),
            2 => Some(Color::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// 棋子类型（编号按序号排列，不是字母序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    /// 车
    Rook,
    /// 马
    Knight,
    /// 炮
    Cannon,
    /// 士/仕
    Guard,
    /// 象/相
    Elephant,
    /// 卒/兵
    Pawn,
    /// 将/帅
    King,
}

impl PieceType {
    /// 类型编号 (1-7)
    pub fn number(&self) -> u8 {
        match self {
            PieceType::Rook => 1,
            PieceType::Knight => 2,
            PieceType::Cannon => 3,
            PieceType::Guard => 4,
            PieceType::Elephant => 5,
            PieceType::Pawn => 6,
            PieceType::King => 7,
        }
    }

    /// 从类型编号解析
    pub fn from_number(n: u8) -> Option<PieceType> {
        match n {
            1 => Some(PieceType::Rook),
            2 => Some(PieceType::Knight),
            3 => Some(PieceType::Cannon),
            4 => Some(PieceType::Guard),
            5 => Some(PieceType::Elephant),
            6 => Some(PieceType::Pawn),
            7 => Some(PieceType::King),
            _ => None,
        }
    }

    /// 棋盘打印用的字母
    pub fn glyph(&self) -> char {
        match self {
            PieceType::Rook => 'R',
            PieceType::Knight => 'N',
            PieceType::Cannon => 'C',
            PieceType::Guard => 'G',
            PieceType::Elephant => 'E',
            PieceType::Pawn => 'P',
            PieceType::King => 'K',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceType::Rook => "Rook",
            PieceType::Knight => "Knight",
            PieceType::Cannon => "Cannon",
            PieceType::Guard => "Guard",
            PieceType::Elephant => "Elephant",
            PieceType::Pawn => "Pawn",
            PieceType::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// 组合棋子编码
#[inline]
pub fn piece_code(color: Color, piece_type: PieceType) -> u8 {
    color.number() * 10 + piece_type.number()
}

/// 编码中的阵营编号
#[inline]
pub fn team_of(code: u8) -> u8 {
    code / 10
}

/// 编码中的类型编号
#[inline]
pub fn kind_of(code: u8) -> u8 {
    code % 10
}

/// 编码是否合法（空格，或阵营 0-2 且类型 1-7）
pub fn is_valid_code(code: u8) -> bool {
    code == EMPTY || (team_of(code) <= 2 && PieceType::from_number(kind_of(code)).is_some())
}

/// 棋盘位置 (row, col)
///
/// row: 0-9 (0 是黑方底线，9 是红方底线)
/// col: 0-8 (对应记谱字母 A-I)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// 检查位置是否在棋盘范围内
    pub fn is_valid(&self) -> bool {
        (0..=9).contains(&self.row) && (0..=8).contains(&self.col)
    }

    /// 位置加偏移量
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Position {
        Position {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// 游戏结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    RedWin,
    BlackWin,
    Draw,
}

impl GameResult {
    /// 数值编码：-1 进行中，0 和棋，其余为胜方编号
    pub fn code(&self) -> i8 {
        match self {
            GameResult::Ongoing => -1,
            GameResult::Draw => 0,
            GameResult::RedWin => 1,
            GameResult::BlackWin => 2,
        }
    }

    /// 某方获胜
    pub fn win_for(color: Color) -> GameResult {
        match color {
            Color::Red => GameResult::RedWin,
            Color::Black => GameResult::BlackWin,
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self != GameResult::Ongoing
    }
}
