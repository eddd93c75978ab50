//! 落子机制
//!
//! 只负责修改棋盘，不检查回合、走法或将军，正式走子与试走共用。

use crate::board::Board;
use crate::piece::Piece;
use crate::position::Position;

/// 落子机制
pub struct Mechanic;

impl Mechanic {
    /// 把棋子移动到目标位置，返回被吃的棋子
    ///
    /// 依次：取走目标格上的棋子，清空棋子原来的格子，把棋子写入目标格并更新其位置。
    pub fn apply_move(board: &mut Board, piece: Piece, to: Position) -> Option<Piece> {
        if !to.is_valid() {
            return None;
        }

        let captured = board.clear(to);
        board.clear(piece.position);
        board.force_set(to, piece);

        captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{PieceKind, Side};

    fn pos(notation: &str) -> Position {
        Position::from_notation(notation).unwrap()
    }

    #[test]
    fn test_apply_move() {
        let mut board = Board::initial();
        let soldier = board.get(pos("e7")).unwrap();

        let captured = Mechanic::apply_move(&mut board, soldier, pos("e6"));
        assert!(captured.is_none());
        assert!(board.get(pos("e7")).is_none());

        let moved = board.get(pos("e6")).unwrap();
        assert_eq!(moved.id, soldier.id);
        assert_eq!(moved.position, pos("e6"));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_apply_capture() {
        let mut board = Board::empty();
        board.add(pos("a1"), PieceKind::Chariot, Side::Red);
        let target_id = board.add(pos("a9"), PieceKind::Horse, Side::Blue).unwrap();
        let chariot = board.get(pos("a1")).unwrap();

        let captured = Mechanic::apply_move(&mut board, chariot, pos("a9")).unwrap();
        assert_eq!(captured.id, target_id);
        assert_eq!(captured.kind, PieceKind::Horse);
        assert!(board.locate(target_id).is_none());
        assert_eq!(board.get(pos("a9")).unwrap().id, chariot.id);
        assert_eq!(board.pieces(Side::Red).len(), 1);
        assert!(board.pieces(Side::Blue).is_empty());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_apply_off_board_is_noop() {
        let mut board = Board::initial();
        let before = board.clone();
        let soldier = board.get(pos("e7")).unwrap();

        assert!(Mechanic::apply_move(&mut board, soldier, Position::new_unchecked(4, 10)).is_none());
        assert_eq!(board, before);
    }
}
