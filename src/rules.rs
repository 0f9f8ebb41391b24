//! 走法合法性判断
//!
//! 每步棋需要同时满足：
//! 1. 起点是当前走棋方的棋子
//! 2. 起点终点不同，终点为空或是对方棋子
//! 3. 该类型棋子自身的走法规则

use crate::board::Board;
use crate::notation::Move;
use crate::types::{piece_code, Color, PieceType, Position};
use std::ops::RangeInclusive;
use thiserror::Error;

/// 九宫列范围
pub const PALACE_COLS: RangeInclusive<i8> = 3..=5;
/// 红方九宫行范围
pub const RED_PALACE_ROWS: RangeInclusive<i8> = 7..=9;
/// 黑方九宫行范围
pub const BLACK_PALACE_ROWS: RangeInclusive<i8> = 0..=2;

/// 将的走法规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KingRule {
    /// 飞将，或九宫内横竖一步
    #[default]
    Strict,
    /// 兼容旧实现：普通走法的判断结果被丢弃，只要起点终点检查通过就算合法
    Legacy,
}

/// 不合法的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("start square does not hold a piece of the side to move")]
    NotOwner,
    #[error("start and end squares are the same")]
    NullMove,
    #[error("destination holds a friendly piece")]
    FriendlyTarget,
    #[error("{0} cannot move that way")]
    PieceRule(PieceType),
}

/// 九宫行范围
pub fn palace_rows(color: Color) -> RangeInclusive<i8> {
    match color {
        Color::Red => RED_PALACE_ROWS,
        Color::Black => BLACK_PALACE_ROWS,
    }
}

/// 检查位置是否在九宫格内
pub fn is_in_palace(pos: Position, color: Color) -> bool {
    PALACE_COLS.contains(&pos.col) && palace_rows(color).contains(&pos.row)
}

/// 检查位置是否在己方半场（象不能过河）
pub fn is_on_own_side(pos: Position, color: Color) -> bool {
    match color {
        Color::Red => pos.row >= 5,
        Color::Black => pos.row <= 4,
    }
}

/// 兵卒是否已过河
pub fn has_crossed_river(pos: Position, color: Color) -> bool {
    match color {
        Color::Red => pos.row < 5,
        Color::Black => pos.row > 4,
    }
}

/// 兵卒前进方向（行偏移）
#[inline]
fn forward(color: Color) -> i8 {
    match color {
        Color::Red => -1,
        Color::Black => 1,
    }
}

/// 判断走法是否合法（将使用默认规则）
pub fn is_legal(board: &Board, mv: &Move, player: Color) -> bool {
    is_legal_with(board, mv, player, KingRule::default())
}

/// 判断走法是否合法
pub fn is_legal_with(board: &Board, mv: &Move, player: Color, king_rule: KingRule) -> bool {
    check_move(board, mv, player, king_rule).is_ok()
}

/// 判断走法是否合法，不合法时给出原因
pub fn check_move(
    board: &Board,
    mv: &Move,
    player: Color,
    king_rule: KingRule,
) -> Result<(), Violation> {
    if board.team_at(mv.from) != player.number() {
        return Err(Violation::NotOwner);
    }
    if mv.from == mv.to {
        return Err(Violation::NullMove);
    }
    if board.team_at(mv.to) == player.number() {
        return Err(Violation::FriendlyTarget);
    }

    let piece_type = match PieceType::from_number(board.kind_at(mv.from)) {
        Some(pt) => pt,
        // 未知类型默认放行
        None => return Ok(()),
    };

    let ok = match piece_type {
        PieceType::Rook => rook_rule(board, mv),
        PieceType::Cannon => cannon_rule(board, mv),
        PieceType::Knight => knight_rule(board, mv),
        PieceType::Guard => guard_rule(mv, player),
        PieceType::Elephant => elephant_rule(board, mv, player),
        PieceType::King => king_rule_check(board, mv, player, king_rule),
        PieceType::Pawn => pawn_rule(mv, player),
    };

    if ok {
        Ok(())
    } else {
        Err(Violation::PieceRule(piece_type))
    }
}

/// 是否将军
///
/// 尚未实现，始终返回 false。
pub fn is_check(_board: &Board, _attacker: Color) -> bool {
    false
}

fn rook_rule(board: &Board, mv: &Move) -> bool {
    board.count_between(mv.from, mv.to) == Some(0)
}

fn cannon_rule(board: &Board, mv: &Move) -> bool {
    let screens = match board.count_between(mv.from, mv.to) {
        Some(n) => n,
        None => return false,
    };
    if board.is_occupied(mv.to) {
        // 吃子需要恰好一个炮架
        screens == 1
    } else {
        screens == 0
    }
}

fn knight_rule(board: &Board, mv: &Move) -> bool {
    let (dr, dc) = (mv.row_delta(), mv.col_delta());
    let leg = match (dr.abs(), dc.abs()) {
        (2, 1) => mv.from.offset(dr / 2, 0),
        (1, 2) => mv.from.offset(0, dc / 2),
        _ => return false,
    };
    // 蹩马腿
    !board.is_occupied(leg)
}

fn guard_rule(mv: &Move, player: Color) -> bool {
    is_in_palace(mv.to, player) && mv.row_delta().abs() == 1 && mv.col_delta().abs() == 1
}

fn elephant_rule(board: &Board, mv: &Move, player: Color) -> bool {
    if !is_on_own_side(mv.to, player) {
        return false;
    }
    let (dr, dc) = (mv.row_delta(), mv.col_delta());
    if dr.abs() != 2 || dc.abs() != 2 {
        return false;
    }
    // 塞象眼
    !board.is_occupied(mv.from.offset(dr / 2, dc / 2))
}

fn king_rule_check(board: &Board, mv: &Move, player: Color, rule: KingRule) -> bool {
    if is_flying_general(board, mv, player) {
        return true;
    }
    match rule {
        KingRule::Strict => {
            let (dr, dc) = (mv.row_delta().abs(), mv.col_delta().abs());
            is_in_palace(mv.to, player) && dr + dc == 1
        }
        KingRule::Legacy => true,
    }
}

/// 飞将：同列对面无子，直接吃对方将
fn is_flying_general(board: &Board, mv: &Move, player: Color) -> bool {
    board.get(mv.to) == piece_code(player.opposite(), PieceType::King)
        && mv.from.col == mv.to.col
        && board.count_between(mv.from, mv.to) == Some(0)
}

fn pawn_rule(mv: &Move, player: Color) -> bool {
    let (dr, dc) = (mv.row_delta(), mv.col_delta());
    if dr == forward(player) && dc == 0 {
        return true;
    }
    // 过河后可以左右走
    has_crossed_river(mv.from, player) && dr == 0 && dc.abs() == 1
}
