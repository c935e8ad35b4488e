use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::combo::ComboConfig;
use crate::board::{HazardLayout, PowerUpThresholds, TileKind};

pub const MIN_GRID_SIDE: usize = 3;
pub const MAX_GRID_SIDE: usize = 20;

/// Static description of one level: board shape, move budget, clear
/// targets, hazard layout and balance knobs. Immutable once a session
/// starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level_number: u32,
    pub rows: usize,
    pub cols: usize,
    pub moves: u32,
    pub palette: Vec<TileKind>,
    pub targets: BTreeMap<TileKind, u32>,
    #[serde(default)]
    pub hazards: HazardLayout,
    #[serde(default)]
    pub ice_spread_rate: f32,
    #[serde(default)]
    pub power_ups: PowerUpThresholds,
    #[serde(default)]
    pub combo: ComboConfig,
    /// When set, obstacle kinds broken as a side effect of a match also
    /// count toward their targets. Off by default: the base rules only
    /// credit the clicked tile's kind.
    #[serde(default)]
    pub credit_hazard_targets: bool,
}

impl LevelConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_GRID_SIDE..=MAX_GRID_SIDE).contains(&self.rows)
            || !(MIN_GRID_SIDE..=MAX_GRID_SIDE).contains(&self.cols)
        {
            return Err(format!(
                "Grid sides must be between {MIN_GRID_SIDE} and {MAX_GRID_SIDE}"
            ));
        }
        if self.moves == 0 {
            return Err("Move budget must be at least 1".to_string());
        }
        if self.palette.is_empty() {
            return Err("Color palette must not be empty".to_string());
        }
        if let Some(kind) = self.palette.iter().find(|k| !k.is_color()) {
            return Err(format!("Palette entry {kind:?} is not a color"));
        }
        for (i, kind) in self.palette.iter().enumerate() {
            if self.palette[..i].contains(kind) {
                return Err(format!("Palette entry {kind:?} is duplicated"));
            }
        }
        if self.targets.is_empty() {
            return Err("Level needs at least one target".to_string());
        }
        for (&kind, &count) in &self.targets {
            if kind == TileKind::Empty {
                return Err("Empty cannot be a target kind".to_string());
            }
            if count == 0 {
                return Err(format!("Target count for {kind:?} must be positive"));
            }
        }
        if !(0.0..=1.0).contains(&self.ice_spread_rate) {
            return Err("Ice spread rate must be between 0.0 and 1.0".to_string());
        }
        if !self.hazards.fits(self.rows * self.cols) {
            return Err("Hazard layout does not fit the board".to_string());
        }
        self.power_ups.validate()?;
        self.combo.validate()?;
        Ok(())
    }

    /// Difficulty curve for levels past the designed set: the move
    /// budget tapers (with relief on every 5th and 10th level), targets
    /// grow, and hazards ramp toward fixed caps.
    pub fn procedural(level_number: u32) -> Self {
        let past_designed = level_number.saturating_sub(50);
        let is_hard = level_number % 5 == 0;
        let is_super_hard = level_number % 10 == 0;

        let mut moves = 50u32.saturating_sub(past_designed / 5).max(35);
        if is_hard {
            moves += 5;
        }
        if is_super_hard {
            moves += 10;
        }

        let palette = TileKind::COLORS.to_vec();

        let mut targets = BTreeMap::new();
        let color_targets = 2 + (level_number % 3) as usize;
        let base_amount = 40 + past_designed / 2;
        for i in 0..color_targets {
            targets.insert(palette[i % palette.len()], base_amount + i as u32 * 10);
        }
        if level_number % 3 == 0 {
            targets.insert(TileKind::Crate, (4 + past_designed / 10).min(8));
        }
        if level_number % 4 == 0 {
            targets.insert(TileKind::Stone, (3 + past_designed / 15).min(7));
        }
        if level_number % 5 == 0 {
            targets.insert(TileKind::Obsidian, (2 + past_designed / 20).min(6));
        }
        if level_number % 6 == 0 {
            targets.insert(TileKind::Balloon, (3 + past_designed / 12).min(7));
        }
        if level_number % 7 == 0 {
            targets.insert(TileKind::Cage, (3 + past_designed / 15).min(6));
        }
        if level_number % 8 == 0 {
            targets.insert(TileKind::Honey, (3 + past_designed / 15).min(6));
        }

        let hazards = HazardLayout {
            crates: (5 + past_designed / 3).min(10),
            stones: (4 + past_designed / 4).min(8),
            obsidians: (2 + past_designed / 8).min(6),
            ice: (3 + past_designed / 5).min(7),
            chains: (3 + past_designed / 5).min(7),
            balloons: (3 + past_designed / 5).min(7),
            jelly: (3 + past_designed / 6).min(6),
            cages: (3 + past_designed / 6).min(6),
            honey: (2 + past_designed / 7).min(6),
            vortices: (1 + past_designed / 10).min(4),
        };

        Self {
            level_number,
            rows: 10,
            cols: 9,
            moves,
            palette,
            targets,
            hazards,
            ice_spread_rate: (0.15 + past_designed as f32 * 0.005).min(0.25),
            power_ups: PowerUpThresholds::default(),
            combo: ComboConfig::default(),
            // Procedural levels set obstacle targets, which can only be
            // credited through hazard breakage.
            credit_hazard_targets: true,
        }
    }
}
