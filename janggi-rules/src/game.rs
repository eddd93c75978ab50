//! 对局控制
//!
//! 走子流程：检查对局状态、走子方和走法 -> 试走 -> 己方将被攻击则撤销 ->
//! 提交吃子 -> 判断对方是否被将死 -> 更新将军标记 -> 交换走子方。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::board::{Board, BoardState};
use crate::error::{JanggiError, Result};
use crate::fen::Fen;
use crate::mechanic::Mechanic;
use crate::moves::{Move, MoveGenerator};
use crate::palace;
use crate::piece::{Piece, PieceId, Side};
use crate::position::Position;

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// 未结束
    Unfinished,
    /// 蓝方胜
    BlueWon,
    /// 红方胜
    RedWon,
}

impl GameState {
    /// 指定阵营获胜
    pub fn won_by(side: Side) -> Self {
        match side {
            Side::Blue => GameState::BlueWon,
            Side::Red => GameState::RedWon,
        }
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        *self != GameState::Unfinished
    }

    /// 胜方
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameState::Unfinished => None,
            GameState::BlueWon => Some(Side::Blue),
            GameState::RedWon => Some(Side::Red),
        }
    }
}

/// 成功走子的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// 停着（原地不动，只交换走子方）
    Passed,
    /// 走子，含被吃的棋子
    Moved(Move),
}

/// 一方存活棋子的名册，将排在最前
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    general: Option<PieceId>,
    pieces: Vec<PieceId>,
}

impl Roster {
    /// 从棋盘上收集指定阵营的棋子
    fn from_board(board: &Board, side: Side) -> Self {
        let mut pieces = board.pieces(side);
        pieces.sort_by_key(|piece| (!piece.is_general(), piece.id));

        Self {
            general: pieces.iter().find(|piece| piece.is_general()).map(|piece| piece.id),
            pieces: pieces.iter().map(|piece| piece.id).collect(),
        }
    }

    /// 将的编号
    pub fn general(&self) -> Option<PieceId> {
        self.general
    }

    /// 全部存活棋子的编号
    pub fn ids(&self) -> &[PieceId] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.pieces.contains(&id)
    }

    fn remove(&mut self, id: PieceId) {
        self.pieces.retain(|&p| p != id);
        if self.general == Some(id) {
            self.general = None;
        }
    }
}

/// 一局将棋
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_turn: Side,
    state: GameState,
    blue: Roster,
    red: Roster,
    /// 将军标记，仅供显示，合法性每次重新计算
    blue_in_check: bool,
    red_in_check: bool,
}

impl Game {
    /// 创建标准开局，蓝方先走
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Side::Blue)
    }

    /// 从自定义棋盘创建对局
    pub fn from_board(board: Board, current_turn: Side) -> Self {
        debug_assert!(palace::tables_are_consistent(), "palace tables are malformed");

        let mut game = Self {
            blue: Roster::from_board(&board, Side::Blue),
            red: Roster::from_board(&board, Side::Red),
            board,
            current_turn,
            state: GameState::Unfinished,
            blue_in_check: false,
            red_in_check: false,
        };
        game.update_check_flags();
        game
    }

    /// 从棋盘状态创建对局
    pub fn from_state(state: BoardState) -> Self {
        Self::from_board(state.board, state.current_turn)
    }

    /// 从布局字符串创建对局
    pub fn from_fen(fen: &str) -> Result<Self> {
        Fen::parse(fen).map(Self::from_state)
    }

    /// 棋盘
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前走子方
    pub fn current_player(&self) -> Side {
        self.current_turn
    }

    /// 对局状态
    pub fn state(&self) -> GameState {
        self.state
    }

    /// 指定阵营是否被将军（上一步走完后的标记）
    pub fn in_check(&self, side: Side) -> bool {
        match side {
            Side::Blue => self.blue_in_check,
            Side::Red => self.red_in_check,
        }
    }

    /// 指定阵营的名册
    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Blue => &self.blue,
            Side::Red => &self.red,
        }
    }

    fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Blue => &mut self.blue,
            Side::Red => &mut self.red,
        }
    }

    /// 指定位置的棋子
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.board.get(pos)
    }

    /// 指定位置棋子的伪合法目标格（用于高亮）；没有棋子则为空
    pub fn pseudo_legal_moves(&self, pos: Position) -> Vec<Position> {
        match self.board.get(pos) {
            Some(piece) => MoveGenerator::pseudo_legal_moves(&self.board, &piece),
            None => Vec::new(),
        }
    }

    /// 指定位置棋子的合法目标格（排除走后己方将被攻击的格子）
    pub fn legal_moves(&self, pos: Position) -> Vec<Position> {
        let Some(piece) = self.board.get(pos) else {
            return Vec::new();
        };

        MoveGenerator::pseudo_legal_moves(&self.board, &piece)
            .into_iter()
            .filter(|&to| {
                let mut trial = self.board.clone();
                Mechanic::apply_move(&mut trial, piece, to);
                !self.is_general_attacked(&trial, piece.side)
            })
            .collect()
    }

    /// 走子，成功返回 true；失败时棋盘、名册和走子方都不变
    pub fn make_move(&mut self, from: Position, to: Position) -> bool {
        match self.try_move(from, to) {
            Ok(_) => true,
            Err(e) => {
                debug!("Rejected move {} -> {}: {}", from, to, e);
                false
            }
        }
    }

    /// 用记法走子，例如 `make_move_notation("e7", "e6")`；记法无效返回 false
    pub fn make_move_notation(&mut self, from: &str, to: &str) -> bool {
        match (Position::from_notation(from), Position::from_notation(to)) {
            (Some(from), Some(to)) => self.make_move(from, to),
            _ => {
                debug!("Rejected move {:?} -> {:?}: invalid notation", from, to);
                false
            }
        }
    }

    /// 走子，返回详细结果或拒绝原因
    pub fn try_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome> {
        if self.state.is_finished() {
            return Err(JanggiError::GameOver);
        }

        let piece = self
            .board
            .get(from)
            .ok_or(JanggiError::NoPiece { position: from })?;

        let mover = self.current_turn;
        if piece.side != mover {
            return Err(JanggiError::NotYourTurn);
        }

        // 原地不动视为停着
        if from == to {
            if self.is_general_attacked(&self.board, mover) {
                return Err(JanggiError::PassWhileInCheck);
            }
            debug!("{} passes", mover);
            self.current_turn = mover.opponent();
            return Ok(MoveOutcome::Passed);
        }

        if !MoveGenerator::pseudo_legal_moves(&self.board, &piece).contains(&to) {
            return Err(JanggiError::IllegalMove { from, to });
        }

        // 试走：被吃的棋子已不在棋盘上，不会参与攻击判断
        let snapshot = self.board.snapshot();
        let captured = Mechanic::apply_move(&mut self.board, piece, to);
        if self.is_general_attacked(&self.board, mover) {
            self.board.restore(snapshot);
            return Err(JanggiError::SelfCheck { from, to });
        }

        let opponent = mover.opponent();
        if let Some(captured) = captured {
            self.roster_mut(opponent).remove(captured.id);
        }

        if captured.is_some_and(|p| p.is_general()) {
            info!("{} captured the {} general at {}", mover, opponent, to);
            self.state = GameState::won_by(mover);
        } else if self.is_checkmate(opponent) {
            info!("{} is checkmated, {} wins", opponent, mover);
            self.state = GameState::won_by(mover);
        }

        self.update_check_flags();
        self.current_turn = opponent;

        let mv = match captured {
            Some(target) => Move::with_capture(from, to, target),
            None => Move::new(from, to),
        };
        debug!("{} played {}", mover, mv);
        Ok(MoveOutcome::Moved(mv))
    }

    /// 检查指定阵营是否被将死
    ///
    /// 被将军时穷举该方每个棋子的每个伪合法走法，在棋盘副本上试走，
    /// 只要有一步能解除将军就不是将死。
    pub fn is_checkmate(&self, side: Side) -> bool {
        if !self.is_general_attacked(&self.board, side) {
            return false;
        }

        for piece in self.live_pieces(&self.board, side) {
            for to in MoveGenerator::pseudo_legal_moves(&self.board, &piece) {
                let mut trial = self.board.clone();
                Mechanic::apply_move(&mut trial, piece, to);
                if !self.is_general_attacked(&trial, side) {
                    trace!("{} escapes check with {} -> {}", side, piece.position, to);
                    return false;
                }
            }
        }

        true
    }

    /// 指定棋盘上，指定阵营的将是否被对方名册中仍在棋盘上的棋子攻击
    fn is_general_attacked(&self, board: &Board, side: Side) -> bool {
        let Some(general) = self.roster(side).general().and_then(|id| board.locate(id)) else {
            return false;
        };

        self.live_pieces(board, side.opponent())
            .iter()
            .any(|attacker| MoveGenerator::attacks(board, attacker, general.position))
    }

    /// 名册中仍在指定棋盘上的棋子
    fn live_pieces(&self, board: &Board, side: Side) -> Vec<Piece> {
        self.roster(side)
            .ids()
            .iter()
            .filter_map(|&id| board.locate(id))
            .collect()
    }

    fn update_check_flags(&mut self) {
        self.blue_in_check = self.is_general_attacked(&self.board, Side::Blue);
        self.red_in_check = self.is_general_attacked(&self.board, Side::Red);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
