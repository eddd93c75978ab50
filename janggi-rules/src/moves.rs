//! 走法生成
//!
//! 每种棋子一个生成函数，产出伪合法目标格：符合走法与占位规则，
//! 但尚未排除走完后己方将被攻击的情况。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::mechanic::Mechanic;
use crate::palace;
use crate::piece::{Piece, PieceKind, Side};
use crate::position::Position;

/// 直线方向
const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// 马、象的走法：先直走一步，再向外斜走（两个选择）
const LEAPS: [((i8, i8), [(i8, i8); 2]); 4] = [
    ((0, 1), [(1, 1), (-1, 1)]),
    ((0, -1), [(1, -1), (-1, -1)]),
    ((1, 0), [(1, 1), (1, -1)]),
    ((-1, 0), [(-1, 1), (-1, -1)]),
];

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(from: Position, to: Position, captured: Piece) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定棋子的伪合法目标格
    pub fn pseudo_legal_moves(board: &Board, piece: &Piece) -> Vec<Position> {
        let mut targets = Vec::with_capacity(20);
        let pos = piece.position;
        let side = piece.side;

        match piece.kind {
            PieceKind::General | PieceKind::Advisor => {
                Self::generate_palace_moves(board, pos, side, &mut targets)
            }
            PieceKind::Elephant => Self::generate_elephant_moves(board, pos, side, &mut targets),
            PieceKind::Horse => Self::generate_horse_moves(board, pos, side, &mut targets),
            PieceKind::Chariot => Self::generate_chariot_moves(board, pos, side, &mut targets),
            PieceKind::Cannon => Self::generate_cannon_moves(board, pos, side, &mut targets),
            PieceKind::Soldier => Self::generate_soldier_moves(board, pos, side, &mut targets),
        }

        targets
    }

    /// 生成指定阵营的所有伪合法走法（不考虑将军）
    pub fn generate_pseudo_legal(board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for piece in board.pieces(side) {
            for to in Self::pseudo_legal_moves(board, &piece) {
                let mv = match board.get(to) {
                    Some(target) => Move::with_capture(piece.position, to, target),
                    None => Move::new(piece.position, to),
                };
                moves.push(mv);
            }
        }

        moves
    }

    /// 生成指定阵营的所有合法走法（过滤掉会导致己方被将军的走法）
    pub fn generate_legal(board: &Board, side: Side) -> Vec<Move> {
        Self::generate_pseudo_legal(board, side)
            .into_iter()
            .filter(|mv| {
                let Some(piece) = board.get(mv.from) else {
                    return false;
                };
                let mut test_board = board.clone();
                Mechanic::apply_move(&mut test_board, piece, mv.to);
                !Self::is_in_check(&test_board, side)
            })
            .collect()
    }

    /// 将、士：沿九宫连线走一步
    fn generate_palace_moves(board: &Board, pos: Position, side: Side, targets: &mut Vec<Position>) {
        for to in palace::links(pos) {
            Self::try_add_target(board, to, side, targets);
        }
    }

    /// 象：直走一步，再同一斜向走两步，途经两格都必须为空
    fn generate_elephant_moves(board: &Board, pos: Position, side: Side, targets: &mut Vec<Position>) {
        for ((fx, fy), diagonals) in LEAPS {
            let Some(first) = pos.offset(fx, fy) else {
                continue;
            };
            if !board.is_empty_at(first) {
                continue;
            }

            for (dx, dy) in diagonals {
                let Some(second) = first.offset(dx, dy) else {
                    continue;
                };
                if !board.is_empty_at(second) {
                    continue;
                }
                if let Some(to) = second.offset(dx, dy) {
                    Self::try_add_target(board, to, side, targets);
                }
            }
        }
    }

    /// 马：直走一步（不能被蹩），再向外斜走一步
    fn generate_horse_moves(board: &Board, pos: Position, side: Side, targets: &mut Vec<Position>) {
        for ((fx, fy), diagonals) in LEAPS {
            let Some(first) = pos.offset(fx, fy) else {
                continue;
            };
            if !board.is_empty_at(first) {
                continue;
            }

            for (dx, dy) in diagonals {
                if let Some(to) = first.offset(dx, dy) {
                    Self::try_add_target(board, to, side, targets);
                }
            }
        }
    }

    /// 车：直线滑行，九宫内可沿斜线走
    fn generate_chariot_moves(board: &Board, pos: Position, side: Side, targets: &mut Vec<Position>) {
        for (dx, dy) in ORTHOGONAL {
            let mut current = pos;
            while let Some(to) = current.offset(dx, dy) {
                if let Some(target) = board.get(to) {
                    // 遇到棋子
                    if target.side != side {
                        targets.push(to);
                    }
                    break;
                }
                targets.push(to);
                current = to;
            }
        }

        // 从九宫角出发：到中心，中心为空时可继续到对角
        if let Some(diagonal) = palace::corner_diagonal(pos) {
            Self::try_add_target(board, diagonal.center, side, targets);
            if board.is_empty_at(diagonal.center) {
                Self::try_add_target(board, diagonal.far_corner, side, targets);
            }
        }

        // 从九宫中心出发：到四个角
        for corner in palace::center_corners(pos) {
            Self::try_add_target(board, corner, side, targets);
        }
    }

    /// 包：必须隔一个非包的棋子（炮架）才能走或吃，且不能吃包
    fn generate_cannon_moves(board: &Board, pos: Position, side: Side, targets: &mut Vec<Position>) {
        for (dx, dy) in ORTHOGONAL {
            let Some(screen) = Self::find_screen(board, pos, dx, dy) else {
                continue;
            };

            let mut current = screen;
            while let Some(to) = current.offset(dx, dy) {
                if let Some(target) = board.get(to) {
                    if target.side != side && !target.is_cannon() {
                        targets.push(to);
                    }
                    break;
                }
                targets.push(to);
                current = to;
            }
        }

        // 九宫斜线：中心必须是非包的棋子，对角不能是己方棋子或包
        if let Some(diagonal) = palace::corner_diagonal(pos) {
            let screen_ok = board
                .get(diagonal.center)
                .is_some_and(|screen| !screen.is_cannon());
            let landing_ok = board
                .get(diagonal.far_corner)
                .is_none_or(|target| target.side != side && !target.is_cannon());
            if screen_ok && landing_ok {
                targets.push(diagonal.far_corner);
            }
        }
    }

    /// 沿方向找到的第一个棋子；没有或是包则返回 None
    fn find_screen(board: &Board, pos: Position, dx: i8, dy: i8) -> Option<Position> {
        let mut current = pos;
        while let Some(next) = current.offset(dx, dy) {
            if let Some(piece) = board.get(next) {
                return (!piece.is_cannon()).then_some(next);
            }
            current = next;
        }
        None
    }

    /// 兵卒：前进或横走一步，不能后退；九宫内可沿斜线向前走
    fn generate_soldier_moves(board: &Board, pos: Position, side: Side, targets: &mut Vec<Position>) {
        let forward = side.forward();

        for (dx, dy) in [(0, forward), (-1, 0), (1, 0)] {
            if let Some(to) = pos.offset(dx, dy) {
                Self::try_add_target(board, to, side, targets);
            }
        }

        for to in palace::diagonal_links(pos) {
            if to.y as i8 - pos.y as i8 == forward {
                Self::try_add_target(board, to, side, targets);
            }
        }
    }

    /// 尝试添加目标（空位或对方棋子）
    fn try_add_target(board: &Board, to: Position, side: Side, targets: &mut Vec<Position>) {
        if board.owner_at(to) != Some(side) && to.is_valid() {
            targets.push(to);
        }
    }

    /// 检查棋子能否攻击到目标位置
    pub fn attacks(board: &Board, piece: &Piece, target: Position) -> bool {
        Self::pseudo_legal_moves(board, piece).contains(&target)
    }

    /// 检查指定阵营的将是否被攻击
    pub fn is_in_check(board: &Board, side: Side) -> bool {
        let general_pos = match board.find_general(side) {
            Some(pos) => pos,
            None => return false, // 没有将，视为不被将军
        };

        board
            .pieces(side.opponent())
            .iter()
            .any(|piece| Self::attacks(board, piece, general_pos))
    }
}
