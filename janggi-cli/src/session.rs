//! 读取走法并驱动对局
//!
//! 每行一步：`<起点> <终点>`，例如 `e7 e6`。起点等于终点为停着。
//! 空行和以 `#` 开头的行被忽略。

use std::io::{BufRead, Write};

use anyhow::Result;
use janggi_rules::{Game, GameState, MoveOutcome, Position};
use tracing::{debug, info};

use crate::render::render;

/// 一次会话的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub accepted: usize,
    pub rejected: usize,
}

/// 逐行读取走法，直到输入结束或对局结束
pub fn run<R: BufRead, W: Write>(
    game: &mut Game,
    input: R,
    out: &mut W,
    show_board: bool,
) -> Result<Summary> {
    let mut summary = Summary::default();

    if show_board {
        write!(out, "{}", render(game.board()))?;
    }

    for (line_no, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let side = game.current_player();
        match play_line(game, line) {
            Ok(MoveOutcome::Passed) => {
                summary.accepted += 1;
                writeln!(out, "{}: {} passes", line_no + 1, side)?;
            }
            Ok(MoveOutcome::Moved(mv)) => {
                summary.accepted += 1;
                match mv.captured {
                    Some(captured) => writeln!(
                        out,
                        "{}: {} {} takes {}",
                        line_no + 1,
                        side,
                        mv,
                        captured.kind.name()
                    )?,
                    None => writeln!(out, "{}: {} {}", line_no + 1, side, mv)?,
                }
                if show_board {
                    write!(out, "{}", render(game.board()))?;
                }
            }
            Err(reason) => {
                summary.rejected += 1;
                debug!("line {} rejected: {}", line_no + 1, reason);
                writeln!(out, "{}: rejected: {}", line_no + 1, reason)?;
                continue;
            }
        }

        let opponent = side.opponent();
        if game.in_check(opponent) && !game.state().is_finished() {
            writeln!(out, "{} is in check", opponent)?;
        }

        if let Some(winner) = game.state().winner() {
            info!("game over after line {}", line_no + 1);
            writeln!(out, "{} wins", winner)?;
            break;
        }
    }

    if game.state() == GameState::Unfinished {
        writeln!(out, "{} to move", game.current_player())?;
    }

    Ok(summary)
}

/// 解析一行并走子
fn play_line(game: &mut Game, line: &str) -> Result<MoveOutcome> {
    let mut fields = line.split_whitespace();
    let (Some(from), Some(to), None) = (fields.next(), fields.next(), fields.next()) else {
        anyhow::bail!("expected `<from> <to>`, got {:?}", line);
    };

    let from: Position = from.parse()?;
    let to: Position = to.parse()?;
    Ok(game.try_move(from, to)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use janggi_rules::Side;
    use std::io::Cursor;

    fn play(game: &mut Game, moves: &str) -> (Summary, String) {
        let mut out = Vec::new();
        let summary = run(game, Cursor::new(moves), &mut out, false).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_moves_and_rejections() {
        let mut game = Game::new();
        let (summary, out) = play(&mut game, "# opening\ne7 e6\n\ne4 e3\ne4 e5\nbad\nz1 a1\n");

        assert_eq!(summary, Summary { accepted: 2, rejected: 3 });
        assert!(out.contains("2: Blue e7 -> e6"));
        assert!(out.contains("4: rejected: Illegal move: e4 to e3"));
        assert!(out.contains("5: Red e4 -> e5"));
        assert!(out.contains("6: rejected: expected"));
        assert!(out.contains("7: rejected: Invalid notation"));
        assert!(out.ends_with("Blue to move\n"));
        assert_eq!(game.current_player(), Side::Blue);
    }

    #[test]
    fn test_stops_at_checkmate() {
        let mut game = Game::from_fen("9/4G4/9/9/9/1R7/9/9/R8/4g4 b").unwrap();
        let (summary, out) = play(&mut game, "b5 b1\ne1 e2\n");

        assert_eq!(summary, Summary { accepted: 1, rejected: 0 });
        assert!(out.contains("Blue wins"));
        assert!(!out.contains("to move"));
        assert_eq!(game.state(), GameState::BlueWon);
    }

    #[test]
    fn test_pass_and_board() {
        let mut game = Game::new();
        let mut out = Vec::new();
        run(&mut game, Cursor::new("e9 e9\n"), &mut out, true).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("    a b c d e f g h i\n"));
        assert!(out.contains("1: Blue passes"));
        assert!(out.ends_with("Red to move\n"));
    }
}
