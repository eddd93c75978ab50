//! 规则常量定义

/// 棋盘宽度（列数，a-i）
pub const BOARD_WIDTH: usize = 9;

/// 棋盘高度（行数，1-10）
pub const BOARD_HEIGHT: usize = 10;

/// 格子总数
pub const BOARD_SQUARES: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// 列字母
pub const COLUMN_LETTERS: [char; BOARD_WIDTH] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i'];

/// 九宫左下角所在列（d）
pub const PALACE_MIN_X: u8 = 3;

/// 九宫右上角所在列（f）
pub const PALACE_MAX_X: u8 = 5;

/// 红方九宫最低行（第 1 行）
pub const RED_PALACE_MIN_Y: u8 = 0;

/// 蓝方九宫最低行（第 8 行）
pub const BLUE_PALACE_MIN_Y: u8 = 7;

/// 九宫边长
pub const PALACE_SIZE: u8 = 3;

/// 每方棋子数
pub const PIECES_PER_SIDE: usize = 16;
