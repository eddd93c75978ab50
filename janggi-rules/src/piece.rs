//! 棋子定义

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 将（楚/漢）
    General,
    /// 士
    Advisor,
    /// 象
    Elephant,
    /// 马
    Horse,
    /// 车
    Chariot,
    /// 包
    Cannon,
    /// 卒/兵
    Soldier,
}

impl PieceKind {
    /// 全部棋子类型
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    /// 获取布局字符（蓝方大写，红方小写）
    pub fn to_fen_char(&self, side: Side) -> char {
        let c = match self {
            PieceKind::General => 'g',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'e',
            PieceKind::Horse => 'h',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 's',
        };
        match side {
            Side::Blue => c.to_ascii_uppercase(),
            Side::Red => c,
        }
    }

    /// 从布局字符解析
    pub fn from_fen_char(c: char) -> Option<(PieceKind, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::Blue
        } else {
            Side::Red
        };
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_fen_char(side) == c)
            .map(|kind| (kind, side))
    }

    /// 棋子名称
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::General => "General",
            PieceKind::Advisor => "Advisor",
            PieceKind::Elephant => "Elephant",
            PieceKind::Horse => "Horse",
            PieceKind::Chariot => "Chariot",
            PieceKind::Cannon => "Cannon",
            PieceKind::Soldier => "Soldier",
        }
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 蓝方（楚，先手，在上方第 7-10 行）
    Blue,
    /// 红方（漢，后手，在下方第 1-4 行）
    Red,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    /// 兵卒前进方向（行号增量）
    pub fn forward(&self) -> i8 {
        match self {
            Side::Blue => -1,
            Side::Red => 1,
        }
    }

    /// 获取布局字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Side::Blue => 'b',
            Side::Red => 'r',
        }
    }

    /// 从布局字符解析
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'b' | 'B' => Some(Side::Blue),
            'r' | 'R' => Some(Side::Red),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Blue => f.write_str("Blue"),
            Side::Red => f.write_str("Red"),
        }
    }
}

/// 棋子编号，同一棋盘内唯一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

/// 棋子
///
/// `position` 始终等于棋盘上持有该棋子的格子，由 [`Board`](crate::Board) 维护。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub side: Side,
    pub position: Position,
}

impl Piece {
    /// 创建新棋子
    pub fn new(id: PieceId, kind: PieceKind, side: Side, position: Position) -> Self {
        Self {
            id,
            kind,
            side,
            position,
        }
    }

    /// 获取布局字符
    pub fn to_fen_char(&self) -> char {
        self.kind.to_fen_char(self.side)
    }

    pub fn is_general(&self) -> bool {
        self.kind == PieceKind::General
    }

    pub fn is_cannon(&self) -> bool {
        self.kind == PieceKind::Cannon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_char() {
        assert_eq!(PieceKind::General.to_fen_char(Side::Blue), 'G');
        assert_eq!(PieceKind::General.to_fen_char(Side::Red), 'g');
        assert_eq!(
            PieceKind::from_fen_char('R'),
            Some((PieceKind::Chariot, Side::Blue))
        );
        assert_eq!(
            PieceKind::from_fen_char('c'),
            Some((PieceKind::Cannon, Side::Red))
        );
        assert_eq!(PieceKind::from_fen_char('k'), None);

        for kind in PieceKind::ALL {
            for side in [Side::Blue, Side::Red] {
                assert_eq!(PieceKind::from_fen_char(kind.to_fen_char(side)), Some((kind, side)));
            }
        }
    }

    #[test]
    fn test_side() {
        assert_eq!(Side::Blue.opponent(), Side::Red);
        assert_eq!(Side::Red.opponent(), Side::Blue);
        assert_eq!(Side::Blue.forward(), -1);
        assert_eq!(Side::Red.forward(), 1);
        assert_eq!(Side::from_fen_char('r'), Some(Side::Red));
        assert_eq!(Side::from_fen_char('x'), None);
    }
}
