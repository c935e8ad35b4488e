use std::collections::HashSet;

use super::grid::Grid;
use super::power_up::{block_footprint, disco_footprint, rocket_footprint};
use super::types::{Position, PowerUp, RocketAxis, TileKind};

/// Joint effect of two adjacent power-ups fired together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combination {
    /// Rocket + Rocket: full row and full column through the trigger.
    CrossBlast,
    /// Rocket + Bomb: three consecutive rows centered on the trigger.
    TripleLine,
    /// Rocket + DiscoBall: every target-color tile fires a rocket.
    ColorRockets,
    /// Bomb + Bomb: 5x5 block around the trigger.
    MegaBomb,
    /// Bomb + DiscoBall: every target-color tile is bombed.
    ColorBombs,
    /// DiscoBall + DiscoBall: the whole board.
    BoardClear,
}

/// Maps a pair of adjacent power-ups to their combination, if the pair
/// has one. Rainbows do not combine. Order-insensitive; rocket axes are
/// irrelevant to the pairing.
pub fn detect_combination(first: PowerUp, second: PowerUp) -> Option<Combination> {
    use PowerUp::{Bomb, DiscoBall, Rocket};

    match (first, second) {
        (Rocket(_), Rocket(_)) => Some(Combination::CrossBlast),
        (Rocket(_), Bomb) | (Bomb, Rocket(_)) => Some(Combination::TripleLine),
        (Rocket(_), DiscoBall) | (DiscoBall, Rocket(_)) => Some(Combination::ColorRockets),
        (Bomb, Bomb) => Some(Combination::MegaBomb),
        (Bomb, DiscoBall) | (DiscoBall, Bomb) => Some(Combination::ColorBombs),
        (DiscoBall, DiscoBall) => Some(Combination::BoardClear),
        _ => None,
    }
}

/// First 4-neighbor of `pos` carrying a power-up, scanning up, down,
/// left, right.
pub fn find_adjacent_power_up(grid: &Grid, pos: Position) -> Option<(Position, PowerUp)> {
    grid.neighbors(pos)
        .find_map(|neighbor| grid.get(neighbor).power_up.map(|p| (neighbor, p)))
}

/// Deduplicated destruction set of a combination fired at `trigger`.
/// `target` is the color driving Disco-involving combinations (the
/// non-disco tile's color); it is ignored by the others. The two
/// trigger tiles themselves are the caller's responsibility — geometric
/// footprints do not always cover them.
pub fn combination_footprint(
    grid: &Grid,
    combination: Combination,
    trigger: Position,
    target: Option<TileKind>,
) -> Vec<Position> {
    let mut footprint = Vec::new();

    match combination {
        Combination::CrossBlast => {
            footprint.extend(rocket_footprint(grid, trigger, RocketAxis::Horizontal));
            footprint.extend(rocket_footprint(grid, trigger, RocketAxis::Vertical));
        }
        Combination::TripleLine => {
            if trigger.row > 0 {
                let above = Position::new(trigger.row - 1, trigger.col);
                footprint.extend(rocket_footprint(grid, above, RocketAxis::Horizontal));
            }
            footprint.extend(rocket_footprint(grid, trigger, RocketAxis::Horizontal));
            if trigger.row + 1 < grid.rows() {
                let below = Position::new(trigger.row + 1, trigger.col);
                footprint.extend(rocket_footprint(grid, below, RocketAxis::Horizontal));
            }
        }
        Combination::ColorRockets => {
            if let Some(target) = target {
                for origin in disco_footprint(grid, target) {
                    let axis = if (origin.row + origin.col) % 2 == 0 {
                        RocketAxis::Horizontal
                    } else {
                        RocketAxis::Vertical
                    };
                    footprint.extend(rocket_footprint(grid, origin, axis));
                }
            }
        }
        Combination::MegaBomb => {
            footprint.extend(block_footprint(grid, trigger, 2));
        }
        Combination::ColorBombs => {
            if let Some(target) = target {
                for origin in disco_footprint(grid, target) {
                    footprint.extend(block_footprint(grid, origin, 1));
                }
            }
        }
        Combination::BoardClear => {
            footprint.extend(grid.positions().filter(|&p| !grid.get(p).is_empty()));
        }
    }

    dedup_preserving_order(footprint)
}

pub(super) fn dedup_preserving_order(cells: Vec<Position>) -> Vec<Position> {
    let mut seen = HashSet::with_capacity(cells.len());
    cells.into_iter().filter(|&p| seen.insert(p)).collect()
}
