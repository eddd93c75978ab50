//! 局面布局字符串解析和生成
//!
//! 格式与中国象棋 FEN 类似：
//! `<棋盘> <走子方>`
//!
//! 棋盘从第 10 行写到第 1 行，行间用 `/` 分隔，数字表示连续空格。
//! 棋子字母：G 将、A 士、E 象、H 马、R 车、C 包、S 卒，蓝方大写、红方小写。
//! 走子方为 `b`（蓝）或 `r`（红），省略时为蓝方。
//!
//! 示例（开局）：
//! `REHA1AEHR/4G4/1C5C1/S1S1S1S1S/9/9/s1s1s1s1s/1c5c1/4g4/reha1aehr b`

use crate::board::{Board, BoardState};
use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::JanggiError;
use crate::piece::{PieceKind, Side};
use crate::position::Position;

/// 初始局面
pub const INITIAL_FEN: &str =
    "REHA1AEHR/4G4/1C5C1/S1S1S1S1S/9/9/s1s1s1s1s/1c5c1/4g4/reha1aehr b";

/// 布局字符串处理
pub struct Fen;

impl Fen {
    /// 解析布局字符串为棋盘状态
    pub fn parse(fen: &str) -> Result<BoardState, JanggiError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(JanggiError::InvalidFen {
                reason: "Empty layout string".to_string(),
            });
        }

        let board = Self::parse_board(parts[0])?;

        let current_turn = match parts.get(1) {
            Some(field) => {
                let mut chars = field.chars();
                match (chars.next().and_then(Side::from_fen_char), chars.next()) {
                    (Some(side), None) => side,
                    _ => {
                        return Err(JanggiError::InvalidFen {
                            reason: format!("Invalid side to move: {}", field),
                        })
                    }
                }
            }
            None => Side::Blue,
        };

        Ok(BoardState::from_board(board, current_turn))
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, JanggiError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_HEIGHT {
            return Err(JanggiError::InvalidFen {
                reason: format!("Expected {} rows, got {}", BOARD_HEIGHT, rows.len()),
            });
        }

        // 从上到下是 y=9 到 y=0
        for (row_idx, row) in rows.iter().enumerate() {
            let y = (BOARD_HEIGHT - 1 - row_idx) as u8;
            let mut x = 0usize;

            for c in row.chars() {
                if x >= BOARD_WIDTH {
                    return Err(JanggiError::InvalidFen {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(empty_count) = c.to_digit(10) {
                    if empty_count == 0 {
                        return Err(JanggiError::InvalidFen {
                            reason: format!("Row {} has a zero-length gap", row_idx),
                        });
                    }
                    x += empty_count as usize;
                } else if let Some((kind, side)) = PieceKind::from_fen_char(c) {
                    board.add(Position::new_unchecked(x as u8, y), kind, side);
                    x += 1;
                } else {
                    return Err(JanggiError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if x != BOARD_WIDTH {
                return Err(JanggiError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected {}", row_idx, x, BOARD_WIDTH),
                });
            }
        }

        Ok(board)
    }

    /// 将棋盘状态转换为布局字符串
    pub fn to_string(state: &BoardState) -> String {
        format!(
            "{} {}",
            Self::board_to_string(&state.board),
            state.current_turn.to_fen_char()
        )
    }

    /// 将棋盘转换为布局字符串的棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_HEIGHT);

        for y in (0..BOARD_HEIGHT as u8).rev() {
            let mut row = String::new();
            let mut empty_count = 0;

            for x in 0..BOARD_WIDTH as u8 {
                if let Some(piece) = board.get(Position::new_unchecked(x, y)) {
                    if empty_count > 0 {
                        row.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row.push_str(&empty_count.to_string());
            }

            rows.push(row);
        }

        rows.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(notation: &str) -> Position {
        Position::from_notation(notation).unwrap()
    }

    #[test]
    fn test_initial_fen_matches_board() {
        let state = Fen::parse(INITIAL_FEN).unwrap();
        assert_eq!(state.current_turn, Side::Blue);
        assert_eq!(
            Fen::board_to_string(&state.board),
            Fen::board_to_string(&Board::initial())
        );
        assert_eq!(Fen::to_string(&BoardState::initial()), INITIAL_FEN);
    }

    #[test]
    fn test_parse_custom_fen() {
        let state = Fen::parse("4G4/9/9/9/9/9/9/9/9/3g5 r").unwrap();
        assert_eq!(state.current_turn, Side::Red);
        assert_eq!(state.board.find_general(Side::Blue), Some(pos("e10")));
        assert_eq!(state.board.find_general(Side::Red), Some(pos("d1")));
        assert!(state.board.is_consistent());
    }

    #[test]
    fn test_default_side() {
        let state = Fen::parse("4G4/9/9/9/9/9/9/9/9/4g4").unwrap();
        assert_eq!(state.current_turn, Side::Blue);
    }

    #[test]
    fn test_invalid_fen() {
        // 行数不对
        assert!(Fen::parse("4G4/9/9").is_err());
        // 列数不对
        assert!(Fen::parse("4G44/9/9/9/9/9/9/9/9/4g4 b").is_err());
        assert!(Fen::parse("4G3/9/9/9/9/9/9/9/9/4g4 b").is_err());
        // 无效字符
        assert!(Fen::parse("4K4/9/9/9/9/9/9/9/9/4g4 b").is_err());
        // 无效走子方
        assert!(Fen::parse("4G4/9/9/9/9/9/9/9/9/4g4 w").is_err());
        assert!(Fen::parse("").is_err());
    }
}
