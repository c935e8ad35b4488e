mod combination;
mod connectivity;
mod generate;
mod gravity;
mod grid;
mod hazards;
mod power_up;
mod shuffle;
mod types;

pub use combination::{
    Combination, combination_footprint, detect_combination, find_adjacent_power_up,
};
pub use connectivity::find_connected;
pub use generate::{BoosterSelection, HazardLayout, generate_board, place_boosters};
pub use gravity::apply_gravity;
pub use grid::{Grid, OBSIDIAN_HEALTH, Tile};
pub use hazards::{HazardChange, HazardEffect, resolve_hazards};
pub use power_up::{
    PowerUpThresholds, bomb_footprint, disco_footprint, rocket_axis, rocket_footprint,
    spawn_for_match,
};
pub use shuffle::{has_possible_moves, shuffle_board};
pub use types::{Position, PowerUp, RocketAxis, TileKind};
