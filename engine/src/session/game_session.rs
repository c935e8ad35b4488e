use std::collections::BTreeMap;

use chrono::Utc;

use super::combo::ComboState;
use super::config::LevelConfig;
use super::events::GameEvent;
use super::rating::{is_level_won, star_rating};
use crate::SessionRng;
use crate::board::{
    BoosterSelection, Grid, Position, PowerUp, Tile, TileKind, apply_gravity, bomb_footprint,
    combination_footprint, detect_combination, disco_footprint, find_adjacent_power_up,
    find_connected, generate_board, has_possible_moves, place_boosters, resolve_hazards,
    rocket_footprint, shuffle_board, spawn_for_match,
};

pub const MATCH_SCORE_PER_TILE: u32 = 10;
pub const MATCH_SIZE_BONUS: u32 = 5;
pub const POWER_UP_SCORE_PER_TILE: u32 = 15;
/// Matches below this size never place a power-up, regardless of the
/// threshold table. Rockets (tier at four) only enter play through
/// pre-game boosters.
pub const POWER_UP_SPAWN_MIN_MATCH: u32 = 5;
pub const MAX_SHUFFLE_ATTEMPTS: u32 = 10;

/// Pacing hints for renderers replaying the event list. The engine
/// itself never sleeps.
pub const MATCH_CLEAR_DELAY_MS: u64 = 300;
pub const POWER_UP_CLEAR_DELAY_MS: u64 = 400;
pub const SHUFFLE_DELAY_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Won,
    OutOfMoves,
    /// Repeated shuffles could not produce a board with a move left.
    Stuck,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The session already ended.
    InputLocked,
    EmptyCell,
    FrozenTile,
    /// The clicked tile has no matchable region of two or more.
    NoMatch,
}

/// Net effect of one accepted click.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickOutcome {
    pub score_delta: u32,
    pub events: Vec<GameEvent>,
    pub status: SessionStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClickResult {
    Resolved(ClickOutcome),
    Rejected(RejectReason),
}

/// One play-through of a level. All mutation goes through clicks; the
/// session owns its RNG, so a (config, seed) pair replays identically.
pub struct GameSession {
    config: LevelConfig,
    grid: Grid,
    moves_left: u32,
    targets_left: BTreeMap<TileKind, u32>,
    score: u32,
    combo: ComboState,
    status: SessionStatus,
    rng: SessionRng,
}

impl GameSession {
    pub fn start(config: LevelConfig, seed: u64) -> Result<Self, String> {
        Self::start_with_boosters(config, &BoosterSelection::default(), seed)
    }

    pub fn start_with_boosters(
        config: LevelConfig,
        boosters: &BoosterSelection,
        seed: u64,
    ) -> Result<Self, String> {
        config.validate()?;

        let mut rng = SessionRng::new(seed);
        let mut grid = generate_board(
            config.rows,
            config.cols,
            &config.palette,
            &config.hazards,
            &mut rng,
        );
        if !boosters.is_empty() {
            grid = place_boosters(&grid, boosters, &mut rng);
        }

        let mut session = Self {
            moves_left: config.moves,
            targets_left: config.targets.clone(),
            score: 0,
            combo: ComboState::idle(),
            status: SessionStatus::Idle,
            config,
            grid,
            rng,
        };
        session.ensure_playable();
        Ok(session)
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn targets_left(&self) -> &BTreeMap<TileKind, u32> {
        &self.targets_left
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> ComboState {
        self.combo
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Star rating once the level is won.
    pub fn stars(&self) -> Option<u8> {
        (self.status == SessionStatus::Won).then(|| star_rating(self.score, &self.config))
    }

    /// Resolves a click against the wall clock. Drivers with a virtual
    /// clock use [`Self::handle_click_at`].
    pub fn handle_click(&mut self, pos: Position) -> ClickResult {
        self.handle_click_at(pos, Utc::now().timestamp_millis())
    }

    pub fn handle_click_at(&mut self, pos: Position, now_ms: i64) -> ClickResult {
        if self.status != SessionStatus::Idle {
            return ClickResult::Rejected(RejectReason::InputLocked);
        }

        let tile = *self.grid.get(pos);
        if tile.is_empty() {
            return ClickResult::Rejected(RejectReason::EmptyCell);
        }
        if tile.frozen {
            return ClickResult::Rejected(RejectReason::FrozenTile);
        }

        if let Some(power_up) = tile.power_up {
            return ClickResult::Resolved(self.fire_power_up(pos, power_up));
        }

        let cells = find_connected(&self.grid, pos);
        if cells.len() < 2 {
            return ClickResult::Rejected(RejectReason::NoMatch);
        }
        ClickResult::Resolved(self.resolve_match(pos, tile.kind, cells, now_ms))
    }

    /// Power-up activation: an adjacent power-up upgrades the firing
    /// into a combination, otherwise the single footprint fires. Costs
    /// no move, credits no targets, skips the streak and the hazard
    /// side effects. Flat scoring per destroyed tile.
    fn fire_power_up(&mut self, pos: Position, power_up: PowerUp) -> ClickOutcome {
        let mut events = Vec::new();

        let combination = find_adjacent_power_up(&self.grid, pos)
            .and_then(|(partner, other)| {
                detect_combination(power_up, other).map(|c| (partner, other, c))
            });

        let destroyed = if let Some((partner, other, combination)) = combination {
            let target = self.disco_target(pos, power_up, partner, other);
            let mut footprint = combination_footprint(&self.grid, combination, pos, target);
            for trigger in [pos, partner] {
                if !footprint.contains(&trigger) {
                    footprint.push(trigger);
                }
            }
            events.push(GameEvent::CombinationFired {
                combination,
                trigger: pos,
                partner,
                destroyed: footprint.clone(),
            });
            footprint
        } else {
            let footprint = match power_up {
                PowerUp::Rocket(axis) => rocket_footprint(&self.grid, pos, axis),
                PowerUp::Bomb => bomb_footprint(&self.grid, pos),
                PowerUp::DiscoBall => {
                    let own = self.grid.get(pos).kind;
                    let mut hits = disco_footprint(&self.grid, own);
                    if hits.is_empty() {
                        hits.push(pos);
                    }
                    hits
                }
                // A rainbow never fires on its own; clicking one just
                // consumes it.
                PowerUp::Rainbow => vec![pos],
            };
            events.push(GameEvent::PowerUpFired {
                pos,
                power_up,
                destroyed: footprint.clone(),
            });
            footprint
        };

        let score_delta = POWER_UP_SCORE_PER_TILE * destroyed.len() as u32;
        self.score += score_delta;

        self.clear_cells(&destroyed);
        self.grid = apply_gravity(&self.grid, &self.config.palette, &mut self.rng);
        self.ensure_playable_with_events(&mut events);

        ClickOutcome {
            score_delta,
            events,
            status: self.status,
        }
    }

    /// Color driving a disco combination: the color under the non-disco
    /// half of the pair.
    fn disco_target(
        &self,
        pos: Position,
        power_up: PowerUp,
        partner: Position,
        other: PowerUp,
    ) -> Option<TileKind> {
        let colored = match (power_up, other) {
            (PowerUp::DiscoBall, PowerUp::DiscoBall) => return None,
            (PowerUp::DiscoBall, _) => partner,
            (_, PowerUp::DiscoBall) => pos,
            _ => return None,
        };
        let kind = self.grid.get(colored).kind;
        kind.is_color().then_some(kind)
    }

    fn resolve_match(
        &mut self,
        anchor: Position,
        kind: TileKind,
        cells: Vec<Position>,
        now_ms: i64,
    ) -> ClickOutcome {
        let mut events = Vec::new();
        let count = cells.len() as u32;

        self.combo.register_match(now_ms, &self.config.combo);

        let base = MATCH_SCORE_PER_TILE * count + MATCH_SIZE_BONUS * count.saturating_sub(2);
        let score_delta = (base as f32 * self.combo.multiplier).floor() as u32;
        self.score += score_delta;

        events.push(GameEvent::Match {
            kind,
            cells: cells.clone(),
            score: score_delta,
        });
        if self.combo.level > 1 {
            events.push(GameEvent::Combo {
                level: self.combo.level,
                multiplier: self.combo.multiplier,
            });
        }

        let spawned = (count >= POWER_UP_SPAWN_MIN_MATCH)
            .then(|| spawn_for_match(&cells, &self.config.power_ups))
            .flatten();

        let (grid, changes) = resolve_hazards(
            &self.grid,
            &cells,
            self.config.ice_spread_rate,
            &mut self.rng,
        );
        self.grid = grid;
        events.extend(changes.iter().map(|&change| GameEvent::Hazard(change)));

        let broken: Vec<_> = changes.iter().filter(|c| c.is_broken()).collect();

        let mut to_clear: Vec<Position> = cells.clone();
        if let Some(power_up) = spawned {
            to_clear.retain(|&p| p != anchor);
            self.grid.get_mut(anchor).power_up = Some(power_up);
            events.push(GameEvent::PowerUpSpawned {
                pos: anchor,
                power_up,
            });
        }
        to_clear.extend(broken.iter().map(|c| c.pos));
        self.clear_cells(&to_clear);
        self.grid = apply_gravity(&self.grid, &self.config.palette, &mut self.rng);

        self.moves_left = self.moves_left.saturating_sub(1);

        self.credit_target(kind, count);
        if self.config.credit_hazard_targets {
            for change in &broken {
                self.credit_target(change.kind, 1);
            }
        }

        if is_level_won(&self.targets_left) {
            self.status = SessionStatus::Won;
        } else if self.moves_left == 0 {
            self.status = SessionStatus::OutOfMoves;
        } else {
            self.ensure_playable_with_events(&mut events);
        }

        ClickOutcome {
            score_delta,
            events,
            status: self.status,
        }
    }

    fn credit_target(&mut self, kind: TileKind, amount: u32) {
        if let Some(left) = self.targets_left.get_mut(&kind) {
            *left = left.saturating_sub(amount);
        }
    }

    fn clear_cells(&mut self, cells: &[Position]) {
        for &pos in cells {
            *self.grid.get_mut(pos) = Tile::EMPTY;
        }
    }

    fn ensure_playable(&mut self) {
        let mut events = Vec::new();
        self.ensure_playable_with_events(&mut events);
    }

    /// Reshuffles a moveless board, bounded. A board that stays
    /// moveless through every attempt ends the session as stuck.
    fn ensure_playable_with_events(&mut self, events: &mut Vec<GameEvent>) {
        if has_possible_moves(&self.grid) {
            return;
        }

        let mut attempts = 0;
        while attempts < MAX_SHUFFLE_ATTEMPTS {
            attempts += 1;
            self.grid = shuffle_board(&self.grid, &self.config.palette, &mut self.rng);
            if has_possible_moves(&self.grid) {
                events.push(GameEvent::Shuffle {
                    attempts,
                    solvable: true,
                });
                return;
            }
        }

        events.push(GameEvent::Shuffle {
            attempts,
            solvable: false,
        });
        self.status = SessionStatus::Stuck;
    }

    #[cfg(test)]
    pub(crate) fn with_grid(config: LevelConfig, grid: Grid, seed: u64) -> Self {
        Self {
            moves_left: config.moves,
            targets_left: config.targets.clone(),
            score: 0,
            combo: ComboState::idle(),
            status: SessionStatus::Idle,
            config,
            grid,
            rng: SessionRng::new(seed),
        }
    }
}
