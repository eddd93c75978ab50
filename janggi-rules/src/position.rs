//! 棋盘坐标与记法
//!
//! 坐标为 (列, 行)，列 0-8 对应 a-i，行 0-9 对应 1-10。
//! 记法为列字母加行号，例如 (4, 1) 即 "e2"。
//! 越界的坐标与记法一律用 `None` 表示，不会 panic。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BLUE_PALACE_MIN_Y, BOARD_HEIGHT, BOARD_WIDTH, COLUMN_LETTERS, PALACE_MAX_X, PALACE_MIN_X,
    PALACE_SIZE, RED_PALACE_MIN_Y,
};
use crate::error::JanggiError;
use crate::piece::Side;

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 列 (0-8)
    pub x: u8,
    /// 行 (0-9)
    pub y: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if (x as usize) < BOARD_WIDTH && (y as usize) < BOARD_HEIGHT {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 从有符号坐标创建，任一分量越界则返回 None
    pub fn from_signed(x: i16, y: i16) -> Option<Self> {
        if x < 0 || y < 0 {
            return None;
        }
        Self::new(u8::try_from(x).ok()?, u8::try_from(y).ok()?)
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.x as usize) < BOARD_WIDTH && (self.y as usize) < BOARD_HEIGHT
    }

    /// 从记法解析，例如 "b5" -> (1, 4)
    ///
    /// 行号必须是规范写法（"1" 到 "10"），"a01"、"a+1" 之类都视为无效。
    pub fn from_notation(notation: &str) -> Option<Self> {
        let mut chars = notation.chars();
        let column = chars.next()?;
        let x = COLUMN_LETTERS.iter().position(|&c| c == column)?;

        let row_str = chars.as_str();
        let row: u8 = row_str.parse().ok()?;
        if row == 0 || row.to_string() != row_str {
            return None;
        }

        Self::new(x as u8, row - 1)
    }

    /// 转换为记法，例如 (1, 4) -> "b5"
    pub fn to_notation(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }
        Some(format!("{}{}", COLUMN_LETTERS[self.x as usize], self.y + 1))
    }

    /// 检查位置是否在任一九宫内
    pub fn in_palace(&self) -> bool {
        self.palace_owner().is_some()
    }

    /// 检查位置是否在指定阵营的九宫内
    pub fn is_in_palace(&self, side: Side) -> bool {
        self.palace_owner() == Some(side)
    }

    /// 位置所在九宫的归属阵营
    pub fn palace_owner(&self) -> Option<Side> {
        if !(PALACE_MIN_X..=PALACE_MAX_X).contains(&self.x) {
            return None;
        }
        if (RED_PALACE_MIN_Y..RED_PALACE_MIN_Y + PALACE_SIZE).contains(&self.y) {
            Some(Side::Red)
        } else if (BLUE_PALACE_MIN_Y..BLUE_PALACE_MIN_Y + PALACE_SIZE).contains(&self.y) {
            Some(Side::Blue)
        } else {
            None
        }
    }

    /// 获取偏移后的位置
    pub fn offset(&self, dx: i8, dy: i8) -> Option<Position> {
        Self::from_signed(self.x as i16 + dx as i16, self.y as i16 + dy as i16)
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.y as usize * BOARD_WIDTH + self.x as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_WIDTH * BOARD_HEIGHT {
            Some(Position {
                x: (index % BOARD_WIDTH) as u8,
                y: (index / BOARD_WIDTH) as u8,
            })
        } else {
            None
        }
    }

    /// 遍历棋盘上全部 90 个位置
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_WIDTH * BOARD_HEIGHT).filter_map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_notation() {
            Some(notation) => f.write_str(&notation),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

impl FromStr for Position {
    type Err = JanggiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s.trim()).ok_or_else(|| JanggiError::InvalidNotation {
            notation: s.to_string(),
        })
    }
}

impl TryFrom<(i16, i16)> for Position {
    type Error = JanggiError;

    fn try_from((x, y): (i16, i16)) -> Result<Self, Self::Error> {
        Self::from_signed(x, y).ok_or(JanggiError::InvalidPosition { x, y })
    }
}
