//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SQUARES, PIECES_PER_SIDE};
use crate::piece::{Piece, PieceId, PieceKind, Side};
use crate::position::Position;

/// 开局摆放（红方坐标），蓝方沿中线上下镜像
const INITIAL_LAYOUT: [(PieceKind, &str); PIECES_PER_SIDE] = [
    (PieceKind::General, "e2"),
    (PieceKind::Advisor, "d1"),
    (PieceKind::Advisor, "f1"),
    (PieceKind::Elephant, "b1"),
    (PieceKind::Elephant, "g1"),
    (PieceKind::Horse, "c1"),
    (PieceKind::Horse, "h1"),
    (PieceKind::Chariot, "a1"),
    (PieceKind::Chariot, "i1"),
    (PieceKind::Cannon, "b3"),
    (PieceKind::Cannon, "h3"),
    (PieceKind::Soldier, "a4"),
    (PieceKind::Soldier, "c4"),
    (PieceKind::Soldier, "e4"),
    (PieceKind::Soldier, "g4"),
    (PieceKind::Soldier, "i4"),
];

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    /// 9x10 棋盘，索引为 y * 9 + x，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
    /// 下一个分配的棋子编号
    next_id: u8,
}

/// 反序列化的中间形式，校验后才能成为 [`Board`]
#[derive(Deserialize)]
struct RawBoard {
    squares: Vec<Option<Piece>>,
    next_id: u8,
}

impl TryFrom<RawBoard> for Board {
    type Error = String;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.squares.len() != BOARD_SQUARES {
            return Err(format!(
                "expected {} squares, got {}",
                BOARD_SQUARES,
                raw.squares.len()
            ));
        }

        let board = Board {
            squares: raw.squares,
            next_id: raw.next_id,
        };
        if !board.is_consistent() {
            return Err("duplicate piece ids or stale piece positions".to_string());
        }
        if board
            .squares
            .iter()
            .flatten()
            .any(|piece| piece.id.0 >= board.next_id)
        {
            return Err("next_id is not above every piece id".to_string());
        }

        Ok(board)
    }
}

/// 棋盘快照
///
/// 值语义的占位副本，可以同时存在任意多个，互不影响。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_SQUARES],
            next_id: 0,
        }
    }

    /// 创建初始棋盘（将帅先放，编号最小）
    pub fn initial() -> Self {
        let mut board = Self::empty();

        for side in [Side::Blue, Side::Red] {
            for (kind, notation) in INITIAL_LAYOUT {
                let Some(red_pos) = Position::from_notation(notation) else {
                    continue;
                };
                let pos = match side {
                    Side::Red => red_pos,
                    Side::Blue => Position::new_unchecked(red_pos.x, 9 - red_pos.y),
                };
                board.add(pos, kind, side);
            }
        }

        board
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 获取指定位置棋子的阵营
    pub fn owner_at(&self, pos: Position) -> Option<Side> {
        self.get(pos).map(|piece| piece.side)
    }

    /// 指定位置是否为空（越界视为不可通行，返回 false）
    pub fn is_empty_at(&self, pos: Position) -> bool {
        pos.is_valid() && self.squares[pos.to_index()].is_none()
    }

    /// 新建棋子并放到指定位置，返回分配的编号
    ///
    /// 位置越界、已被占用或编号用完时返回 None，棋盘不变。
    pub fn add(&mut self, pos: Position, kind: PieceKind, side: Side) -> Option<PieceId> {
        let id = PieceId(self.next_id);
        let next_id = self.next_id.checked_add(1)?;
        if self.place(pos, Piece::new(id, kind, side, pos)) {
            self.next_id = next_id;
            Some(id)
        } else {
            None
        }
    }

    /// 放置棋子
    ///
    /// 位置越界、已被占用或棋子编号已在棋盘上时返回 false 且不做任何修改。
    /// 编号为 255 的棋子会用尽编号，之后 [`Board::add`] 返回 None。
    pub fn place(&mut self, pos: Position, piece: Piece) -> bool {
        if !self.is_empty_at(pos) || self.locate(piece.id).is_some() {
            return false;
        }
        self.force_set(pos, piece);
        self.next_id = self.next_id.max(piece.id.0.saturating_add(1));
        true
    }

    /// 清空指定位置，返回原来的棋子
    pub fn clear(&mut self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()].take()
        } else {
            None
        }
    }

    /// 直接写入棋子（不检查规则，也不清空棋子原来的格子，由调用方负责）
    ///
    /// 棋子记录的位置会改写为 `pos`。
    pub fn force_set(&mut self, pos: Position, mut piece: Piece) {
        if pos.is_valid() {
            piece.position = pos;
            self.squares[pos.to_index()] = Some(piece);
        }
    }

    /// 保存快照
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            squares: self.squares.clone(),
        }
    }

    /// 用快照覆盖当前占位，并让每个棋子记录的位置与所在格子重新一致
    pub fn restore(&mut self, snapshot: BoardSnapshot) {
        self.squares = snapshot.squares;
        for (index, square) in self.squares.iter_mut().enumerate() {
            if let (Some(piece), Some(pos)) = (square.as_mut(), Position::from_index(index)) {
                piece.position = pos;
            }
        }
    }

    /// 按编号查找棋子
    pub fn locate(&self, id: PieceId) -> Option<Piece> {
        self.squares.iter().flatten().find(|piece| piece.id == id).copied()
    }

    /// 查找指定阵营的将
    pub fn find_general(&self, side: Side) -> Option<Position> {
        self.squares
            .iter()
            .flatten()
            .find(|piece| piece.is_general() && piece.side == side)
            .map(|piece| piece.position)
    }

    /// 获取指定阵营的所有棋子
    pub fn pieces(&self, side: Side) -> Vec<Piece> {
        self.squares
            .iter()
            .flatten()
            .filter(|piece| piece.side == side)
            .copied()
            .collect()
    }

    /// 检查结构不变量：每个编号至多出现在一个格子里，且棋子记录的位置等于所在格子
    pub fn is_consistent(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.squares.iter().enumerate().all(|(index, square)| match square {
            Some(piece) => {
                Position::from_index(index) == Some(piece.position) && seen.insert(piece.id)
            }
            None => true,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

/// 棋盘状态（棋盘加走子方），用于导入自定义局面
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub current_turn: Side,
}

impl BoardState {
    /// 创建初始状态（蓝方先走）
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            current_turn: Side::Blue,
        }
    }

    /// 从棋盘创建状态
    pub fn from_board(board: Board, current_turn: Side) -> Self {
        Self {
            board,
            current_turn,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PIECES_PER_SIDE;

    fn pos(notation: &str) -> Position {
        Position::from_notation(notation).unwrap()
    }

    #[test]
    fn test_initial_board() {
        let board = Board::initial();

        let general = board.get(pos("e2")).unwrap();
        assert_eq!((general.kind, general.side), (PieceKind::General, Side::Red));

        let general = board.get(pos("e9")).unwrap();
        assert_eq!((general.kind, general.side), (PieceKind::General, Side::Blue));

        let cannon = board.get(pos("h8")).unwrap();
        assert_eq!((cannon.kind, cannon.side), (PieceKind::Cannon, Side::Blue));

        let elephant = board.get(pos("g1")).unwrap();
        assert_eq!(elephant.kind, PieceKind::Elephant);

        let horse = board.get(pos("c10")).unwrap();
        assert_eq!(horse.kind, PieceKind::Horse);

        assert_eq!(board.owner_at(pos("a7")), Some(Side::Blue));
        assert_eq!(board.owner_at(pos("a4")), Some(Side::Red));
        assert_eq!(board.owner_at(pos("e1")), None);

        assert_eq!(board.pieces(Side::Blue).len(), PIECES_PER_SIDE);
        assert_eq!(board.pieces(Side::Red).len(), PIECES_PER_SIDE);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_serde_json() {
        let board = Board::initial();
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_serde_rejects_malformed_board() {
        assert!(serde_json::from_str::<Board>(r#"{"squares":[],"next_id":0}"#).is_err());

        // 同一编号出现在两个格子
        let mut value = serde_json::to_value(Board::initial()).unwrap();
        let first = value["squares"][0].clone();
        value["squares"][1] = first;
        assert!(serde_json::from_value::<Board>(value).is_err());

        // next_id 不大于已有编号
        let mut value = serde_json::to_value(Board::initial()).unwrap();
        value["next_id"] = serde_json::json!(3);
        assert!(serde_json::from_value::<Board>(value).is_err());
    }

    #[test]
    fn test_place_and_clear() {
        let mut board = Board::empty();
        let id = board.add(pos("c5"), PieceKind::Horse, Side::Red).unwrap();

        // 已被占用
        assert!(board.add(pos("c5"), PieceKind::Soldier, Side::Blue).is_none());
        let other = Piece::new(PieceId(40), PieceKind::Soldier, Side::Blue, pos("c5"));
        assert!(!board.place(pos("c5"), other));
        // 越界
        assert!(!board.place(Position::new_unchecked(9, 0), other));

        assert_eq!(board.locate(id).map(|p| p.position), Some(pos("c5")));
        let cleared = board.clear(pos("c5")).unwrap();
        assert_eq!(cleared.id, id);
        assert!(board.get(pos("c5")).is_none());
        assert!(board.locate(id).is_none());
    }

    #[test]
    fn test_place_rejects_duplicate_id() {
        let mut board = Board::empty();
        let id = board.add(pos("a1"), PieceKind::Chariot, Side::Red).unwrap();

        let twin = Piece::new(id, PieceKind::Soldier, Side::Blue, pos("b1"));
        assert!(!board.place(pos("b1"), twin));
        assert!(board.get(pos("b1")).is_none());
        assert!(board.is_consistent());
    }

    #[test]
    fn test_ids_run_out() {
        let mut board = Board::empty();
        let last = Piece::new(PieceId(u8::MAX), PieceKind::Chariot, Side::Red, pos("a1"));
        assert!(board.place(pos("a1"), last));

        // 不会复用 255，也不会溢出
        assert_eq!(board.add(pos("b1"), PieceKind::Soldier, Side::Red), None);
        assert!(board.get(pos("b1")).is_none());
        assert_eq!(board.locate(PieceId(u8::MAX)).map(|p| p.position), Some(pos("a1")));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_force_set_updates_position() {
        let mut board = Board::empty();
        board.add(pos("a1"), PieceKind::Chariot, Side::Red);
        let piece = board.get(pos("a1")).unwrap();

        board.force_set(pos("a5"), piece);
        assert_eq!(board.get(pos("a5")).unwrap().position, pos("a5"));
        // 原格子没有被清空，由调用方负责
        assert!(board.get(pos("a1")).is_some());
        assert!(!board.is_consistent());

        board.clear(pos("a1"));
        assert!(board.is_consistent());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut board = Board::initial();
        let before = board.clone();
        let first = board.snapshot();

        let soldier = board.clear(pos("e7")).unwrap();
        board.force_set(pos("e6"), soldier);
        let second = board.snapshot();

        board.clear(pos("e6"));
        assert_ne!(board, before);

        // 快照互不覆盖
        board.restore(second);
        assert_eq!(board.get(pos("e6")).unwrap().position, pos("e6"));

        board.restore(first);
        assert_eq!(board, before);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_find_general() {
        let board = Board::initial();
        assert_eq!(board.find_general(Side::Red), Some(pos("e2")));
        assert_eq!(board.find_general(Side::Blue), Some(pos("e9")));
        assert_eq!(Board::empty().find_general(Side::Red), None);
    }
}
