use super::grid::{Grid, Tile};
use super::types::{Position, TileKind};
use crate::SessionRng;

/// Compacts every column downward and refills the vacated rows at the
/// top with fresh random tiles from the palette, flagged `is_new`.
/// Surviving tiles keep their overlays and relative order; obstacles
/// fall exactly like color tiles. Columns are independent.
pub fn apply_gravity(grid: &Grid, palette: &[TileKind], rng: &mut SessionRng) -> Grid {
    assert!(!palette.is_empty(), "refill palette must not be empty");

    let mut next = Grid::new(grid.rows(), grid.cols(), Tile::EMPTY);

    for col in 0..grid.cols() {
        let mut write_row = grid.rows();
        for row in (0..grid.rows()).rev() {
            let tile = grid.get(Position::new(row, col));
            if !tile.is_empty() {
                write_row -= 1;
                let landed = next.get_mut(Position::new(write_row, col));
                *landed = *tile;
                landed.is_new = false;
            }
        }

        for row in (0..write_row).rev() {
            let mut fresh = Tile::color(*rng.pick(palette));
            fresh.is_new = true;
            *next.get_mut(Position::new(row, col)) = fresh;
        }
    }

    next
}
