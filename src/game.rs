//! 对局状态机
//!
//! 持有棋盘、走棋方、胜负和一步悔棋记录。
//!
//! 状态：进行中（winner = Ongoing）-> 结束（胜、和、认输）。结束后不再接受走棋和悔棋。

use crate::board::{Board, Grid, COLS, ROWS};
use crate::layout::{LayoutSource, STANDARD, STANDARD_NAME};
use crate::notation::{self, Move};
use crate::rules::{self, KingRule};
use crate::types::{piece_code, Color, GameResult, PieceType, EMPTY};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 引擎配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// 将的走法规则
    pub king_rule: KingRule,
    /// 开局布局名称
    pub layout: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            king_rule: KingRule::Strict,
            layout: STANDARD_NAME.to_string(),
        }
    }
}

/// 走棋结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// 不接受（记谱错误、不合法、对局已结束）
    Rejected,
    /// 普通走棋
    Ok,
    /// 吃子
    Capture,
    /// 将军
    Check,
}

impl MoveStatus {
    /// 数值编码：-1 / 0 / 1 / 2
    pub fn code(&self) -> i8 {
        match self {
            MoveStatus::Rejected => -1,
            MoveStatus::Ok => 0,
            MoveStatus::Capture => 1,
            MoveStatus::Check => 2,
        }
    }

    pub fn is_accepted(&self) -> bool {
        *self != MoveStatus::Rejected
    }
}

impl fmt::Display for MoveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveStatus::Rejected => "rejected",
            MoveStatus::Ok => "ok",
            MoveStatus::Capture => "capture",
            MoveStatus::Check => "check",
        };
        write!(f, "{}", name)
    }
}

/// 悔棋记录（只保留最后一步）
#[derive(Debug, Clone)]
struct UndoEntry {
    mv: Move,
    notation: String,
    captured: u8,
}

/// 对局状态快照（供界面读取）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub layout: Grid,
    pub current_player: u8,
    pub winner: i8,
    pub game_over: bool,
    pub last_move: String,
    pub last_captured: u8,
}

/// 对局状态
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_player: Color,
    winner: GameResult,
    undo: Option<UndoEntry>,
    king_rule: KingRule,
}

impl GameState {
    /// 从编码数组创建，红方先走
    pub fn from_grid(grid: Grid, config: &EngineConfig) -> GameState {
        GameState {
            board: Board::from_grid(grid),
            current_player: Color::Red,
            winner: GameResult::Ongoing,
            undo: None,
            king_rule: config.king_rule,
        }
    }

    /// 标准开局
    pub fn standard() -> GameState {
        GameState::from_grid(*STANDARD, &EngineConfig::default())
    }

    /// 空棋盘
    pub fn empty(config: &EngineConfig) -> GameState {
        GameState::from_grid([[EMPTY; COLS]; ROWS], config)
    }

    /// 从布局来源创建
    ///
    /// 获取失败时记录警告并使用空棋盘，不返回错误。
    pub fn from_source(source: &dyn LayoutSource, config: &EngineConfig) -> GameState {
        match source.fetch(&config.layout) {
            Ok(grid) => {
                info!("new game from layout {:?}", config.layout);
                GameState::from_grid(grid, config)
            }
            Err(e) => {
                warn!(
                    "layout {:?} unavailable, starting from an empty board: {}",
                    config.layout, e
                );
                GameState::empty(config)
            }
        }
    }

    /// 当前棋盘编码
    #[inline]
    pub fn layout(&self) -> &Grid {
        self.board.grid()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    #[inline]
    pub fn winner(&self) -> GameResult {
        self.winner
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.winner.is_terminal()
    }

    /// 最后一步的记谱，没有时为空字符串
    pub fn last_move(&self) -> &str {
        self.undo.as_ref().map_or("", |u| u.notation.as_str())
    }

    /// 最后一步吃掉的棋子编码，没有时为 0
    pub fn last_captured(&self) -> u8 {
        self.undo.as_ref().map_or(EMPTY, |u| u.captured)
    }

    pub fn king_rule(&self) -> KingRule {
        self.king_rule
    }

    /// 走棋
    pub fn make_move(&mut self, notation: &str) -> MoveStatus {
        if self.is_game_over() {
            debug!("rejected {:?}: game is over", notation);
            return MoveStatus::Rejected;
        }

        let mv = match notation::parse(notation) {
            Ok(mv) => mv,
            Err(e) => {
                debug!("rejected {:?}: {}", notation, e);
                return MoveStatus::Rejected;
            }
        };

        let mover = self.current_player;
        if let Err(v) = rules::check_move(&self.board, &mv, mover, self.king_rule) {
            debug!("rejected {} for {}: {}", mv, mover, v);
            return MoveStatus::Rejected;
        }

        let piece = self.board.get(mv.from);
        let captured = self.board.get(mv.to);
        self.board.set(mv.to, piece);
        self.board.set(mv.from, EMPTY);

        self.current_player = mover.opposite();
        self.undo = Some(UndoEntry {
            mv,
            notation: mv.to_notation(),
            captured,
        });
        debug!("{} played {} (captured {})", mover, mv, captured);

        self.update_winner();

        if rules::is_check(&self.board, mover) {
            MoveStatus::Check
        } else if captured != EMPTY {
            MoveStatus::Capture
        } else {
            MoveStatus::Ok
        }
    }

    /// 悔棋（只能悔一步）
    pub fn recall_move(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let entry = match self.undo.take() {
            Some(entry) => entry,
            None => return false,
        };

        let piece = self.board.get(entry.mv.to);
        self.board.set(entry.mv.from, piece);
        self.board.set(entry.mv.to, entry.captured);
        self.current_player = self.current_player.opposite();
        debug!("recalled {}", entry.notation);
        true
    }

    /// 当前走棋方认输
    pub fn resign(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.winner = GameResult::win_for(self.current_player.opposite());
        info!("{} resigned", self.current_player);
    }

    /// 和棋
    pub fn draw(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.winner = GameResult::Draw;
        info!("game drawn");
    }

    /// 状态快照
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            layout: *self.layout(),
            current_player: self.current_player.number(),
            winner: self.winner.code(),
            game_over: self.is_game_over(),
            last_move: self.last_move().to_string(),
            last_captured: self.last_captured(),
        }
    }

    /// 检查双方的将是否还在棋盘上
    fn update_winner(&mut self) {
        let red_alive = self.board.contains(piece_code(Color::Red, PieceType::King));
        let black_alive = self.board.contains(piece_code(Color::Black, PieceType::King));

        match (red_alive, black_alive) {
            (true, true) => {}
            (true, false) => self.winner = GameResult::RedWin,
            (false, true) => self.winner = GameResult::BlackWin,
            (false, false) => panic!("both kings are missing from the board"),
        }

        if self.is_game_over() {
            info!("game over: {:?}", self.winner);
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        match self.winner {
            GameResult::Ongoing => writeln!(f, "Turn: {}", self.current_player),
            GameResult::Draw => writeln!(f, "Result: draw"),
            GameResult::RedWin => writeln!(f, "Result: {} wins", Color::Red),
            GameResult::BlackWin => writeln!(f, "Result: {} wins", Color::Black),
        }
    }
}
