//! Shared text rendering for two-player grid boards.
//!
//! Board cells use the `0` (empty) / `1` (`Max` piece) / `2` (`Min` piece)
//! encoding shared by every game in the workspace.

/// Vertical order in which rows are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// Row 0 is the top row (TicTacToe)
    TopDown,
    /// Row 0 is the bottom row (Connect 4)
    BottomUp,
}

/// Render a row-major board as text, one line per row, top row first.
///
/// - `symbols`: characters for `Max` and `Min` pieces
/// - `empty`: character for empty cells
/// - `column_labels`: when set, a footer line numbers the columns from 0
pub fn render_grid(
    board: &[u8],
    width: usize,
    height: usize,
    order: RowOrder,
    symbols: [char; 2],
    empty: char,
    column_labels: bool,
) -> String {
    debug_assert_eq!(board.len(), width * height);
    let mut out = String::with_capacity((width * 2 + 1) * (height + 1));

    for line in 0..height {
        let row = match order {
            RowOrder::TopDown => line,
            RowOrder::BottomUp => height - 1 - line,
        };
        let cells: Vec<String> = (0..width)
            .map(|col| {
                let symbol = match board[row * width + col] {
                    1 => symbols[0],
                    2 => symbols[1],
                    _ => empty,
                };
                symbol.to_string()
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }

    if column_labels {
        let labels: Vec<String> = (0..width).map(|col| (col % 10).to_string()).collect();
        out.push_str(&labels.join(" "));
        out.push('\n');
    }

    out
}
