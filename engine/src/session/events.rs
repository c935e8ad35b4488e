use crate::board::{Combination, HazardChange, Position, PowerUp, TileKind};

/// Everything observable that happened while resolving one click, in
/// the order it happened. Renderers replay these for animation; tests
/// assert on them directly.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Match {
        kind: TileKind,
        cells: Vec<Position>,
        score: u32,
    },
    Combo {
        level: u32,
        multiplier: f32,
    },
    PowerUpSpawned {
        pos: Position,
        power_up: PowerUp,
    },
    PowerUpFired {
        pos: Position,
        power_up: PowerUp,
        destroyed: Vec<Position>,
    },
    CombinationFired {
        combination: Combination,
        trigger: Position,
        partner: Position,
        destroyed: Vec<Position>,
    },
    Hazard(HazardChange),
    Shuffle {
        attempts: u32,
        solvable: bool,
    },
}
