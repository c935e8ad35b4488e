use super::connectivity::find_connected;
use super::grid::Grid;
use super::types::{Position, TileKind};
use crate::SessionRng;

/// A board has a move iff some cell starts a matchable region of two or
/// more tiles. O(cells) flood fills; fine at puzzle-board scale.
pub fn has_possible_moves(grid: &Grid) -> bool {
    grid.positions()
        .any(|pos| find_connected(grid, pos).len() >= 2)
}

/// Uniformly permutes the colors of palette-kind cells in place.
/// Obstacles and power-up carriers keep their cells and are excluded
/// from the pool, so the board's hazard layout is untouched. A single
/// pass does not guarantee solvability; callers retry within a bound.
pub fn shuffle_board(grid: &Grid, palette: &[TileKind], rng: &mut SessionRng) -> Grid {
    let mut next = grid.clone();

    let eligible: Vec<Position> = next
        .positions()
        .filter(|&pos| {
            let tile = next.get(pos);
            palette.contains(&tile.kind) && tile.power_up.is_none()
        })
        .collect();

    let mut pool: Vec<TileKind> = eligible.iter().map(|&pos| next.get(pos).kind).collect();
    rng.shuffle_in_place(&mut pool);

    for (pos, kind) in eligible.into_iter().zip(pool) {
        next.get_mut(pos).kind = kind;
    }

    next
}
