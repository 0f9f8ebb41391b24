//! Xiangqi rules engine
//!
//! 象棋规则引擎 - 记谱解析、走法判断、对局状态机

pub mod board;
pub mod game;
pub mod layout;
pub mod notation;
pub mod rules;
pub mod types;

pub use board::{Board, Grid, COLS, ROWS};
pub use game::{EngineConfig, GameState, MoveStatus, Snapshot};
pub use layout::{LayoutBook, LayoutError, LayoutFile, LayoutSource, STANDARD};
pub use notation::{Move, NotationError};
pub use rules::{is_legal, is_legal_with, KingRule, Violation};
pub use types::{Color, GameResult, PieceType, Position};
