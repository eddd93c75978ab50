//! 错误类型定义

use thiserror::Error;

use crate::position::Position;

/// 将棋规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JanggiError {
    /// 无效的坐标记法（例如 "j1"、"a11"）
    #[error("Invalid notation: {notation:?}")]
    InvalidNotation { notation: String },

    /// 无效的位置
    #[error("Invalid position: ({x}, {y})")]
    InvalidPosition { x: i16, y: i16 },

    /// 无效的布局字符串
    #[error("Invalid layout string: {reason}")]
    InvalidFen { reason: String },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 没有棋子
    #[error("No piece at {position}")]
    NoPiece { position: Position },

    /// 不是你的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 被将军时不能停着
    #[error("Cannot pass while in check")]
    PassWhileInCheck,

    /// 棋子走法不允许
    #[error("Illegal move: {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// 走法会让己方将帅被攻击
    #[error("Move {from} to {to} would leave the general in check")]
    SelfCheck { from: Position, to: Position },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, JanggiError>;
