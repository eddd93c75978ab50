//! 韩国将棋（Janggi）规则库
//!
//! 包含:
//! - 棋子、棋盘、坐标等核心数据结构
//! - 九宫连线表
//! - 伪合法走法生成和攻击判断
//! - 对局控制：回合、停着、自将检查、将死判断
//! - 局面布局字符串

mod board;
mod constants;
mod error;
mod fen;
mod game;
mod mechanic;
mod moves;
pub mod palace;
mod piece;
mod position;

pub use board::{Board, BoardSnapshot, BoardState};
pub use constants::*;
pub use error::{JanggiError, Result};
pub use fen::{Fen, INITIAL_FEN};
pub use game::{Game, GameState, MoveOutcome, Roster};
pub use mechanic::Mechanic;
pub use moves::{Move, MoveGenerator};
pub use piece::{Piece, PieceId, PieceKind, Side};
pub use position::Position;
