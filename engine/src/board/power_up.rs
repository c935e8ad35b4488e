use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::types::{Position, PowerUp, RocketAxis, TileKind};

/// Match-size thresholds controlling which power-up a match spawns.
/// Balance parameters, not rules: levels may override them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpThresholds {
    pub rocket_exact: usize,
    pub bomb_min: usize,
    pub bomb_max: usize,
    pub rainbow_exact: usize,
    pub disco_min: usize,
}

impl Default for PowerUpThresholds {
    fn default() -> Self {
        Self {
            rocket_exact: 4,
            bomb_min: 5,
            bomb_max: 6,
            rainbow_exact: 7,
            disco_min: 8,
        }
    }
}

impl PowerUpThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if self.bomb_min > self.bomb_max {
            return Err("Bomb lower threshold exceeds its upper threshold".to_string());
        }
        if self.disco_min <= self.bomb_max {
            return Err("Disco ball threshold must exceed the bomb range".to_string());
        }
        Ok(())
    }
}

/// Decides which power-up (if any) a match of the given shape spawns.
/// The tiers are checked in priority order: disco ball for the largest
/// matches, then the bomb band, then the exact rocket and rainbow sizes.
pub fn spawn_for_match(cells: &[Position], thresholds: &PowerUpThresholds) -> Option<PowerUp> {
    let count = cells.len();

    if count >= thresholds.disco_min {
        return Some(PowerUp::DiscoBall);
    }
    if (thresholds.bomb_min..=thresholds.bomb_max).contains(&count) {
        return Some(PowerUp::Bomb);
    }
    if count == thresholds.rocket_exact {
        return Some(PowerUp::Rocket(rocket_axis(cells)));
    }
    if count == thresholds.rainbow_exact {
        return Some(PowerUp::Rainbow);
    }

    None
}

/// A cluster spanning more distinct columns than rows is labelled
/// Horizontal, otherwise Vertical. The label names the axis the rocket
/// fires along (Horizontal clears its row).
pub fn rocket_axis(cells: &[Position]) -> RocketAxis {
    let rows: HashSet<usize> = cells.iter().map(|p| p.row).collect();
    let cols: HashSet<usize> = cells.iter().map(|p| p.col).collect();

    if cols.len() > rows.len() {
        RocketAxis::Horizontal
    } else {
        RocketAxis::Vertical
    }
}

/// Every non-empty cell in the rocket's row (Horizontal) or column
/// (Vertical). Rockets destroy indiscriminately: frozen tiles and
/// obstacles inside the line are included.
pub fn rocket_footprint(grid: &Grid, pos: Position, axis: RocketAxis) -> Vec<Position> {
    let line: Vec<Position> = match axis {
        RocketAxis::Horizontal => (0..grid.cols()).map(|c| Position::new(pos.row, c)).collect(),
        RocketAxis::Vertical => (0..grid.rows()).map(|r| Position::new(r, pos.col)).collect(),
    };
    line.into_iter()
        .filter(|&p| !grid.get(p).is_empty())
        .collect()
}

/// Every non-empty cell in the 3x3 block around `pos`, clamped to the
/// grid bounds.
pub fn bomb_footprint(grid: &Grid, pos: Position) -> Vec<Position> {
    block_footprint(grid, pos, 1)
}

pub(super) fn block_footprint(grid: &Grid, pos: Position, radius: usize) -> Vec<Position> {
    let row_start = pos.row.saturating_sub(radius);
    let row_end = (pos.row + radius).min(grid.rows() - 1);
    let col_start = pos.col.saturating_sub(radius);
    let col_end = (pos.col + radius).min(grid.cols() - 1);

    let mut footprint = Vec::new();
    for row in row_start..=row_end {
        for col in col_start..=col_end {
            let candidate = Position::new(row, col);
            if !grid.get(candidate).is_empty() {
                footprint.push(candidate);
            }
        }
    }
    footprint
}

/// Every tile on the board whose kind equals the target color. The
/// disco ball has no color of its own; callers supply the color of the
/// tile that triggered it.
pub fn disco_footprint(grid: &Grid, target: TileKind) -> Vec<Position> {
    if !target.is_color() {
        return Vec::new();
    }
    grid.positions()
        .filter(|&p| grid.get(p).kind == target)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tile;
    use TileKind::{Blue, Crate, Empty, Red};

    fn line(cells: &[(usize, usize)]) -> Vec<Position> {
        cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    #[test]
    fn test_rocket_spawns_at_exact_threshold() {
        let thresholds = PowerUpThresholds::default();
        let cells = line(&[(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(
            spawn_for_match(&cells, &thresholds),
            Some(PowerUp::Rocket(RocketAxis::Horizontal))
        );
    }

    #[test]
    fn test_rocket_axis_follows_cluster_shape() {
        // Wide cluster: 4 columns x 1 row.
        assert_eq!(
            rocket_axis(&line(&[(0, 0), (0, 1), (0, 2), (0, 3)])),
            RocketAxis::Horizontal
        );
        // Tall cluster: 1 column x 4 rows.
        assert_eq!(
            rocket_axis(&line(&[(0, 0), (1, 0), (2, 0), (3, 0)])),
            RocketAxis::Vertical
        );
        // Square cluster ties break to Vertical.
        assert_eq!(
            rocket_axis(&line(&[(0, 0), (0, 1), (1, 0), (1, 1)])),
            RocketAxis::Vertical
        );
    }

    #[test]
    fn test_bomb_band_and_fall_through_above_it() {
        let thresholds = PowerUpThresholds::default();
        let five = line(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
        assert_eq!(spawn_for_match(&five, &thresholds), Some(PowerUp::Bomb));

        // One past the bomb cap lands on the rainbow threshold, not a bomb.
        let seven = line(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6)]);
        assert_eq!(spawn_for_match(&seven, &thresholds), Some(PowerUp::Rainbow));
    }

    #[test]
    fn test_disco_outranks_everything() {
        let thresholds = PowerUpThresholds::default();
        let cells: Vec<Position> = (0..9).map(|c| Position::new(0, c)).collect();
        assert_eq!(spawn_for_match(&cells, &thresholds), Some(PowerUp::DiscoBall));
    }

    #[test]
    fn test_small_match_spawns_nothing() {
        let thresholds = PowerUpThresholds::default();
        assert_eq!(spawn_for_match(&line(&[(0, 0), (0, 1)]), &thresholds), None);
        assert_eq!(
            spawn_for_match(&line(&[(0, 0), (0, 1), (0, 2)]), &thresholds),
            None
        );
    }

    #[test]
    fn test_rocket_footprint_skips_empty_cells() {
        #[rustfmt::skip]
        let grid = Grid::from_rows(&[
            &[Red, Empty, Blue, Crate],
        ]);

        let hits = rocket_footprint(&grid, Position::new(0, 0), RocketAxis::Horizontal);
        assert_eq!(
            hits,
            vec![Position::new(0, 0), Position::new(0, 2), Position::new(0, 3)]
        );
    }

    #[test]
    fn test_bomb_footprint_clamped_at_corner() {
        let grid = Grid::new(4, 4, Tile::color(Red));
        let hits = bomb_footprint(&grid, Position::new(0, 0));
        assert_eq!(hits.len(), 4);

        let hits = bomb_footprint(&grid, Position::new(2, 2));
        assert_eq!(hits.len(), 9);
    }

    #[test]
    fn test_disco_footprint_targets_one_color_everywhere() {
        #[rustfmt::skip]
        let grid = Grid::from_rows(&[
            &[Red,  Blue, Red],
            &[Blue, Red,  Crate],
        ]);

        let hits = disco_footprint(&grid, Red);
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|&p| grid.get(p).kind == Red));

        assert!(disco_footprint(&grid, Empty).is_empty());
        assert!(disco_footprint(&grid, Crate).is_empty());
    }

    #[test]
    fn test_threshold_validation() {
        let mut thresholds = PowerUpThresholds::default();
        assert!(thresholds.validate().is_ok());
        thresholds.bomb_min = 10;
        assert!(thresholds.validate().is_err());
    }
}
