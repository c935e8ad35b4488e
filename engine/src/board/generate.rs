use serde::{Deserialize, Serialize};

use super::grid::{Grid, Tile};
use super::types::{Position, PowerUp, RocketAxis, TileKind};
use crate::SessionRng;

/// How many of each hazard a freshly generated board carries. All
/// placements land on color cells, so the sum of every count must leave
/// room for matches (validated by the level config).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardLayout {
    pub crates: u32,
    pub stones: u32,
    pub obsidians: u32,
    pub ice: u32,
    pub chains: u32,
    pub balloons: u32,
    pub jelly: u32,
    pub cages: u32,
    pub honey: u32,
    pub vortices: u32,
}

impl HazardLayout {
    /// Cells whose kind is replaced by an obstacle (as opposed to
    /// overlays layered onto a color tile).
    pub fn replaced_cells(&self) -> u32 {
        self.crates + self.stones + self.obsidians + self.balloons + self.cages + self.honey
            + self.vortices
    }

    pub fn total(&self) -> u32 {
        self.replaced_cells() + self.ice + self.chains + self.jelly
    }

    /// Whether every placement pass can terminate on a board with this
    /// many cells. Ice and chains both need unfrozen color cells, jelly
    /// needs color cells; a 10% margin keeps the retry loops fast.
    pub fn fits(&self, cells: usize) -> bool {
        let margin = (cells * 9 / 10) as u32;
        self.replaced_cells() + self.ice + self.chains <= margin
            && self.replaced_cells() + self.jelly <= margin
    }
}

const CHAIN_START_LEVEL: u8 = 2;
const JELLY_START_LEVEL: u8 = 1;

/// Builds a starting board: random palette fill, then the hazard
/// passes. Each pass retries random cells until its count is placed;
/// config validation guarantees enough color cells remain for every
/// pass to terminate.
pub fn generate_board(
    rows: usize,
    cols: usize,
    palette: &[TileKind],
    layout: &HazardLayout,
    rng: &mut SessionRng,
) -> Grid {
    assert!(!palette.is_empty(), "palette must not be empty");
    assert!(layout.fits(rows * cols), "hazard layout does not fit the board");

    let mut grid = Grid::new(rows, cols, Tile::EMPTY);
    for pos in grid.positions().collect::<Vec<_>>() {
        *grid.get_mut(pos) = Tile::color(*rng.pick(palette));
    }

    place_obstacles(&mut grid, TileKind::Crate, layout.crates, rng);
    place_obstacles(&mut grid, TileKind::Stone, layout.stones, rng);
    place_obstacles(&mut grid, TileKind::Obsidian, layout.obsidians, rng);
    place_obstacles(&mut grid, TileKind::Balloon, layout.balloons, rng);
    place_obstacles(&mut grid, TileKind::Cage, layout.cages, rng);
    place_obstacles(&mut grid, TileKind::Honey, layout.honey, rng);
    place_obstacles(&mut grid, TileKind::Vortex, layout.vortices, rng);

    place_overlay(&mut grid, layout.ice, rng, |tile| {
        if tile.kind.is_color() && !tile.frozen {
            tile.frozen = true;
            true
        } else {
            false
        }
    });
    place_overlay(&mut grid, layout.chains, rng, |tile| {
        if tile.kind.is_color() && !tile.frozen && tile.chain_level == 0 {
            tile.chain_level = CHAIN_START_LEVEL;
            true
        } else {
            false
        }
    });
    place_overlay(&mut grid, layout.jelly, rng, |tile| {
        if tile.kind.is_color() && tile.jelly_level == 0 {
            tile.jelly_level = JELLY_START_LEVEL;
            true
        } else {
            false
        }
    });

    grid
}

fn place_obstacles(grid: &mut Grid, kind: TileKind, count: u32, rng: &mut SessionRng) {
    let mut placed = 0;
    while placed < count {
        let pos = random_position(grid, rng);
        if grid.get(pos).kind.is_color() {
            *grid.get_mut(pos) = Tile::obstacle(kind);
            placed += 1;
        }
    }
}

fn place_overlay(
    grid: &mut Grid,
    count: u32,
    rng: &mut SessionRng,
    mut apply: impl FnMut(&mut Tile) -> bool,
) {
    let mut placed = 0;
    while placed < count {
        let pos = random_position(grid, rng);
        if apply(grid.get_mut(pos)) {
            placed += 1;
        }
    }
}

fn random_position(grid: &Grid, rng: &mut SessionRng) -> Position {
    Position::new(
        rng.random_range(0..grid.rows()),
        rng.random_range(0..grid.cols()),
    )
}

/// Power-ups the player chose to start the level with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoosterSelection {
    pub rockets: u32,
    pub bombs: u32,
    pub disco_balls: u32,
}

impl BoosterSelection {
    pub fn is_empty(&self) -> bool {
        self.rockets == 0 && self.bombs == 0 && self.disco_balls == 0
    }
}

const DISCO_PLACEMENT_ATTEMPTS: u32 = 50;

/// Seeds pre-game boosters onto the fresh board: rockets at the corner
/// and mid-edge anchors with alternating axes, bombs in a cross around
/// the center, disco balls at random color cells (bounded attempts).
/// Boosters only land on plain color tiles and never stack.
pub fn place_boosters(grid: &Grid, selection: &BoosterSelection, rng: &mut SessionRng) -> Grid {
    let mut next = grid.clone();
    let (rows, cols) = (next.rows(), next.cols());

    let rocket_anchors = [
        Position::new(0, 0),
        Position::new(0, cols - 1),
        Position::new(rows / 2, 0),
        Position::new(rows / 2, cols - 1),
    ];
    for (i, &pos) in rocket_anchors
        .iter()
        .enumerate()
        .take(selection.rockets as usize)
    {
        let tile = next.get_mut(pos);
        if tile.kind.is_color() && tile.power_up.is_none() {
            let axis = if i % 2 == 0 {
                RocketAxis::Horizontal
            } else {
                RocketAxis::Vertical
            };
            tile.power_up = Some(PowerUp::Rocket(axis));
        }
    }

    let center = Position::new(rows / 2, cols / 2);
    let bomb_anchors = [
        center,
        Position::new(center.row.saturating_sub(1), center.col),
        Position::new((center.row + 1).min(rows - 1), center.col),
        Position::new(center.row, center.col.saturating_sub(1)),
    ];
    for &pos in bomb_anchors.iter().take(selection.bombs as usize) {
        let tile = next.get_mut(pos);
        if tile.kind.is_color() && tile.power_up.is_none() {
            tile.power_up = Some(PowerUp::Bomb);
        }
    }

    let mut placed = 0;
    let mut attempts = 0;
    while placed < selection.disco_balls && attempts < DISCO_PLACEMENT_ATTEMPTS {
        let pos = random_position(&next, rng);
        let tile = next.get_mut(pos);
        if tile.kind.is_color() && tile.power_up.is_none() {
            tile.power_up = Some(PowerUp::DiscoBall);
            placed += 1;
        }
        attempts += 1;
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<TileKind> {
        TileKind::COLORS.to_vec()
    }

    #[test]
    fn test_generated_board_has_requested_hazard_counts() {
        let layout = HazardLayout {
            crates: 4,
            stones: 3,
            obsidians: 2,
            ice: 3,
            chains: 2,
            balloons: 2,
            jelly: 2,
            cages: 1,
            honey: 1,
            vortices: 1,
        };
        let mut rng = SessionRng::new(42);
        let grid = generate_board(10, 9, &palette(), &layout, &mut rng);

        assert_eq!(grid.count_kind(TileKind::Crate), 4);
        assert_eq!(grid.count_kind(TileKind::Stone), 3);
        assert_eq!(grid.count_kind(TileKind::Obsidian), 2);
        assert_eq!(grid.count_kind(TileKind::Balloon), 2);
        assert_eq!(grid.count_kind(TileKind::Cage), 1);
        assert_eq!(grid.count_kind(TileKind::Honey), 1);
        assert_eq!(grid.count_kind(TileKind::Vortex), 1);
        assert_eq!(grid.count_kind(TileKind::Empty), 0);

        let frozen = grid.positions().filter(|&p| grid.get(p).frozen).count();
        let chained = grid
            .positions()
            .filter(|&p| grid.get(p).chain_level > 0)
            .count();
        let jellied = grid
            .positions()
            .filter(|&p| grid.get(p).jelly_level > 0)
            .count();
        assert_eq!(frozen, 3);
        assert_eq!(chained, 2);
        assert_eq!(jellied, 2);
    }

    #[test]
    fn test_obsidian_placed_with_health() {
        let layout = HazardLayout {
            obsidians: 3,
            ..HazardLayout::default()
        };
        let mut rng = SessionRng::new(7);
        let grid = generate_board(6, 6, &palette(), &layout, &mut rng);

        for pos in grid.positions() {
            let tile = grid.get(pos);
            if tile.kind == TileKind::Obsidian {
                assert_eq!(tile.health, tile.max_health);
                assert!(tile.health.unwrap() > 0);
            }
        }
    }

    #[test]
    fn test_overlays_only_on_color_tiles() {
        let layout = HazardLayout {
            crates: 6,
            ice: 5,
            chains: 4,
            jelly: 4,
            ..HazardLayout::default()
        };
        let mut rng = SessionRng::new(3);
        let grid = generate_board(8, 8, &palette(), &layout, &mut rng);

        for pos in grid.positions() {
            let tile = grid.get(pos);
            if tile.frozen || tile.chain_level > 0 || tile.jelly_level > 0 {
                assert!(tile.kind.is_color());
            }
        }
    }

    #[test]
    fn test_same_seed_same_board() {
        let layout = HazardLayout {
            crates: 3,
            ice: 2,
            ..HazardLayout::default()
        };
        let mut a = SessionRng::new(5);
        let mut b = SessionRng::new(5);
        assert_eq!(
            generate_board(7, 7, &palette(), &layout, &mut a),
            generate_board(7, 7, &palette(), &layout, &mut b)
        );
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn test_oversized_layout_panics() {
        let layout = HazardLayout {
            crates: 20,
            ..HazardLayout::default()
        };
        let mut rng = SessionRng::new(1);
        generate_board(4, 4, &palette(), &layout, &mut rng);
    }

    #[test]
    fn test_boosters_land_on_their_anchors() {
        let mut rng = SessionRng::new(9);
        let grid = generate_board(8, 8, &palette(), &HazardLayout::default(), &mut rng);

        let selection = BoosterSelection {
            rockets: 2,
            bombs: 1,
            disco_balls: 2,
        };
        let boosted = place_boosters(&grid, &selection, &mut rng);

        assert_eq!(
            boosted.get(Position::new(0, 0)).power_up,
            Some(PowerUp::Rocket(RocketAxis::Horizontal))
        );
        assert_eq!(
            boosted.get(Position::new(0, 7)).power_up,
            Some(PowerUp::Rocket(RocketAxis::Vertical))
        );
        assert_eq!(boosted.get(Position::new(4, 4)).power_up, Some(PowerUp::Bomb));

        let discos = boosted
            .positions()
            .filter(|&p| boosted.get(p).power_up == Some(PowerUp::DiscoBall))
            .count();
        assert_eq!(discos, 2);
    }
}
