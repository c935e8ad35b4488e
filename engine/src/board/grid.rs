use super::types::{Position, PowerUp, TileKind};

/// Full state of one cell: its kind plus the overlay mechanics that can
/// sit on top of it (ice coating, chain wrap, jelly underneath, obstacle
/// health, a carried power-up) and the transient animation flags.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    pub frozen: bool,
    pub chain_level: u8,
    pub jelly_level: u8,
    pub health: Option<u8>,
    pub max_health: Option<u8>,
    pub power_up: Option<PowerUp>,
    pub is_new: bool,
    pub dying: bool,
}

pub const OBSIDIAN_HEALTH: u8 = 3;

impl Tile {
    pub const EMPTY: Tile = Tile {
        kind: TileKind::Empty,
        frozen: false,
        chain_level: 0,
        jelly_level: 0,
        health: None,
        max_health: None,
        power_up: None,
        is_new: false,
        dying: false,
    };

    pub fn color(kind: TileKind) -> Self {
        assert!(kind.is_color(), "not a color kind: {kind:?}");
        Tile {
            kind,
            ..Tile::EMPTY
        }
    }

    pub fn obstacle(kind: TileKind) -> Self {
        assert!(kind.is_obstacle(), "not an obstacle kind: {kind:?}");
        let health = (kind == TileKind::Obsidian).then_some(OBSIDIAN_HEALTH);
        Tile {
            kind,
            health,
            max_health: health,
            ..Tile::EMPTY
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == TileKind::Empty
    }
}

/// Fixed-size board of tiles, row 0 at the top, stored as a flat buffer.
///
/// Board operations never mutate a grid they were handed; they build and
/// return a new snapshot so the session can diff old and new state.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, fill: Tile) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be non-zero");
        Self {
            rows,
            cols,
            tiles: vec![fill; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "position {pos:?} out of bounds for {}x{} grid",
            self.rows,
            self.cols
        );
        pos.row * self.cols + pos.col
    }

    pub fn get(&self, pos: Position) -> &Tile {
        &self.tiles[self.index(pos)]
    }

    pub fn get_mut(&mut self, pos: Position) -> &mut Tile {
        let index = self.index(pos);
        &mut self.tiles[index]
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |i| Position::new(i / cols, i % cols))
    }

    /// In-bounds 4-directional neighbors.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + use<> {
        let (rows, cols) = (self.rows as isize, self.cols as isize);
        let (row, col) = (pos.row as isize, pos.col as isize);
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .map(move |(dr, dc)| (row + dr, col + dc))
            .filter(move |&(r, c)| r >= 0 && r < rows && c >= 0 && c < cols)
            .map(|(r, c)| Position::new(r as usize, c as usize))
    }

    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&[TileKind]]) -> Self {
        assert!(!rows.is_empty() && !rows[0].is_empty());
        let cols = rows[0].len();
        let tiles = rows
            .iter()
            .flat_map(|row| {
                assert_eq!(row.len(), cols, "ragged row in grid literal");
                row.iter().map(|&kind| {
                    if kind == TileKind::Empty {
                        Tile::EMPTY
                    } else if kind.is_color() {
                        Tile::color(kind)
                    } else {
                        Tile::obstacle(kind)
                    }
                })
            })
            .collect();
        Self {
            rows: rows.len(),
            cols,
            tiles,
        }
    }
}
