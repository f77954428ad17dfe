use mined_out_core::{Minefield, Position};

/// Plain-text board: `#` wall, `*` mine, `o` path, `E` entry, `X` exit.
pub fn board(minefield: &Minefield, path: &[Position]) -> String {
    let bounds = minefield.bounds();
    let mut out = String::new();

    for y in bounds.min_y() - 1..=bounds.max_y() + 1 {
        for x in bounds.min_x() - 1..=bounds.max_x() + 1 {
            let pos = Position::new(x, y);
            let cell = if !bounds.contains(pos) {
                '#'
            } else if pos == minefield.entry() {
                'E'
            } else if pos == minefield.exit() {
                'X'
            } else if minefield.has_mine_at(pos) {
                '*'
            } else if path.contains(&pos) {
                'o'
            } else {
                '.'
            };
            out.push(cell);
        }
        out.push('\n');
    }
    out
}
