//! 九宫连线表
//!
//! 将、士只能沿九宫内的连线走（含经过中心的斜线），车、包、兵在九宫内
//! 也可以沿斜线走。两座九宫形状相同，表中坐标相对于九宫左下角（d 列），
//! 查询时再映射到红方（第 1-3 行）或蓝方（第 8-10 行）的九宫。

use crate::constants::{
    BLUE_PALACE_MIN_Y, PALACE_MAX_X, PALACE_MIN_X, PALACE_SIZE, RED_PALACE_MIN_Y,
};
use crate::piece::Side;
use crate::position::Position;

/// 九宫内相对坐标 (列, 行)
type Cell = (u8, u8);

/// 九宫中心
const CENTER: Cell = (1, 1);

/// 九宫连线：格子 -> 一步可达的相邻格子
const LINKS: [(Cell, &[Cell]); 9] = [
    ((0, 0), &[(0, 1), (1, 1), (1, 0)]),
    ((1, 0), &[(1, 1), (0, 0), (2, 0)]),
    ((2, 0), &[(1, 1), (2, 1), (1, 0)]),
    ((0, 1), &[(0, 2), (1, 1), (0, 0)]),
    (
        (1, 1),
        &[(0, 2), (1, 2), (2, 2), (0, 1), (2, 1), (0, 0), (1, 0), (2, 0)],
    ),
    ((2, 1), &[(2, 2), (1, 1), (2, 0)]),
    ((0, 2), &[(1, 2), (0, 1), (1, 1)]),
    ((1, 2), &[(0, 2), (2, 2), (1, 1)]),
    ((2, 2), &[(1, 2), (1, 1), (2, 1)]),
];

/// 九宫斜线：角 -> (经过的中心, 对角)
const DIAGONALS: [(Cell, Cell, Cell); 4] = [
    ((0, 0), CENTER, (2, 2)),
    ((2, 0), CENTER, (0, 2)),
    ((0, 2), CENTER, (2, 0)),
    ((2, 2), CENTER, (0, 0)),
];

/// 从九宫一角出发、经过中心的斜线
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PalaceDiagonal {
    /// 九宫中心
    pub center: Position,
    /// 对角
    pub far_corner: Position,
}

/// 九宫左下角所在行
fn base_row(side: Side) -> u8 {
    match side {
        Side::Red => RED_PALACE_MIN_Y,
        Side::Blue => BLUE_PALACE_MIN_Y,
    }
}

/// 绝对坐标 -> (所属九宫, 相对坐标)
fn to_cell(pos: Position) -> Option<(Side, Cell)> {
    let side = pos.palace_owner()?;
    Some((side, (pos.x - PALACE_MIN_X, pos.y - base_row(side))))
}

/// 相对坐标 -> 绝对坐标
fn to_position(side: Side, cell: Cell) -> Position {
    Position::new_unchecked(PALACE_MIN_X + cell.0, base_row(side) + cell.1)
}

fn lookup(cell: Cell) -> &'static [Cell] {
    LINKS
        .iter()
        .find(|(from, _)| *from == cell)
        .map(|(_, to)| *to)
        .unwrap_or(&[])
}

/// 九宫内一步可达的格子；不在九宫内则为空
pub fn links(pos: Position) -> Vec<Position> {
    match to_cell(pos) {
        Some((side, cell)) => lookup(cell)
            .iter()
            .map(|&to| to_position(side, to))
            .collect(),
        None => Vec::new(),
    }
}

/// 九宫内一步可达的斜向格子（角与中心之间）
pub fn diagonal_links(pos: Position) -> Vec<Position> {
    links(pos)
        .into_iter()
        .filter(|to| to.x != pos.x && to.y != pos.y)
        .collect()
}

/// 位于九宫一角时，经过中心通往对角的斜线
pub fn corner_diagonal(pos: Position) -> Option<PalaceDiagonal> {
    let (side, cell) = to_cell(pos)?;
    DIAGONALS
        .iter()
        .find(|(corner, _, _)| *corner == cell)
        .map(|&(_, center, far)| PalaceDiagonal {
            center: to_position(side, center),
            far_corner: to_position(side, far),
        })
}

/// 位于九宫中心时，斜向相邻的四个角
pub fn center_corners(pos: Position) -> Vec<Position> {
    match to_cell(pos) {
        Some((side, cell)) if cell == CENTER => DIAGONALS
            .iter()
            .map(|&(corner, _, _)| to_position(side, corner))
            .collect(),
        _ => Vec::new(),
    }
}

/// 校验连线表
///
/// 要求：两座九宫共 18 个格子各有且只有一个表项；每条连线都是一步（横、竖或斜）
/// 且双向对称；斜线的中心与对角在同一条直线上。
pub fn tables_are_consistent() -> bool {
    let palace_cells: Vec<Position> = Position::all().filter(|p| p.in_palace()).collect();
    if palace_cells.len() != 2 * (PALACE_SIZE as usize).pow(2) {
        return false;
    }

    for &pos in &palace_cells {
        let Some((_, cell)) = to_cell(pos) else {
            return false;
        };
        if LINKS.iter().filter(|(from, _)| *from == cell).count() != 1 {
            return false;
        }

        for to in links(pos) {
            let dx = (to.x as i8 - pos.x as i8).abs();
            let dy = (to.y as i8 - pos.y as i8).abs();
            if dx > 1 || dy > 1 || (dx == 0 && dy == 0) {
                return false;
            }
            if to.palace_owner() != pos.palace_owner() || !links(to).contains(&pos) {
                return false;
            }
        }
    }

    DIAGONALS.iter().all(|&(corner, center, far)| {
        center.0 * 2 == corner.0 + far.0
            && center.1 * 2 == corner.1 + far.1
            && (PALACE_MIN_X + far.0) <= PALACE_MAX_X
    })
}
