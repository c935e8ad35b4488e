use serde::{Deserialize, Serialize};

/// The category of a single cell: one of the matchable colors, a
/// non-matchable obstacle, or the transient empty sentinel left behind
/// between a clear and the next gravity pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Stone,
    Crate,
    Obsidian,
    Balloon,
    Cage,
    Honey,
    Vortex,
    Empty,
}

impl TileKind {
    pub const COLORS: [TileKind; 5] = [
        TileKind::Red,
        TileKind::Blue,
        TileKind::Green,
        TileKind::Yellow,
        TileKind::Purple,
    ];

    pub fn is_color(self) -> bool {
        matches!(
            self,
            TileKind::Red | TileKind::Blue | TileKind::Green | TileKind::Yellow | TileKind::Purple
        )
    }

    pub fn is_obstacle(self) -> bool {
        matches!(
            self,
            TileKind::Stone
                | TileKind::Crate
                | TileKind::Obsidian
                | TileKind::Balloon
                | TileKind::Cage
                | TileKind::Honey
                | TileKind::Vortex
        )
    }

    /// Obstacles destroyed by a single adjacent clear.
    pub fn is_single_hit_obstacle(self) -> bool {
        self.is_obstacle() && self != TileKind::Obsidian
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RocketAxis {
    Horizontal,
    Vertical,
}

/// A special tile created by a large match. The carrying tile keeps its
/// color kind underneath; activating the power-up destroys an area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUp {
    Rocket(RocketAxis),
    Bomb,
    DiscoBall,
    Rainbow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}
