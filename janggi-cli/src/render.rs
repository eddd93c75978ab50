//! 文本棋盘

use janggi_rules::{Board, Position, BOARD_HEIGHT, BOARD_WIDTH, COLUMN_LETTERS};

/// 把棋盘渲染为文本，第 10 行在上；蓝方大写，红方小写，空格为 `.`
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    let header: String = COLUMN_LETTERS.iter().map(|c| format!(" {}", c)).collect();

    out.push_str("   ");
    out.push_str(&header);
    out.push('\n');

    for y in (0..BOARD_HEIGHT as u8).rev() {
        out.push_str(&format!("{:>3}", y + 1));
        for x in 0..BOARD_WIDTH as u8 {
            let c = board
                .get(Position::new_unchecked(x, y))
                .map_or('.', |piece| piece.to_fen_char());
            out.push(' ');
            out.push(c);
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_initial() {
        let text = render(&Board::initial());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), BOARD_HEIGHT + 1);
        assert_eq!(lines[0], "    a b c d e f g h i");
        assert_eq!(lines[1], " 10 R E H A . A E H R");
        assert_eq!(lines[2], "  9 . . . . G . . . .");
        assert_eq!(lines[9], "  2 . . . . g . . . .");
        assert_eq!(lines[10], "  1 r e h a . a e h r");
    }
}
