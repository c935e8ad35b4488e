use super::grid::Grid;
use super::types::{Position, TileKind};
use crate::SessionRng;

/// What happened to a single tile while hazard side effects of a clear
/// were applied. One tile can appear several times in a change list
/// (e.g. it was unfrozen and its chain weakened in the same resolution).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardEffect {
    /// Ice coating consumed; the tile itself survives.
    Unfrozen,
    /// Chain wrap weakened to the given remaining level.
    ChainWeakened { level: u8 },
    /// Jelly under a cleared tile eroded to the given remaining level.
    JellyCleared { level: u8 },
    /// Obsidian took a hit and is still standing.
    ObsidianHit { health: u8 },
    /// Obstacle destroyed; the cell must be cleared by the caller.
    Broken,
    /// Ice spread froze this tile after the clears were processed.
    Frozen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HazardChange {
    pub pos: Position,
    pub kind: TileKind,
    pub effect: HazardEffect,
}

impl HazardChange {
    pub fn is_broken(&self) -> bool {
        self.effect == HazardEffect::Broken
    }
}

/// Applies the side effects a resolved clear has on the surrounding
/// obstacles and overlays, returning the updated grid and the list of
/// discrete changes for presentation.
///
/// Per cleared cell: jelly *under that cell* erodes by one, then each
/// in-bounds 4-neighbor is processed — ice melts, chains weaken,
/// single-hit obstacles break, obsidian loses one health and breaks at
/// zero. A tile adjacent to several cleared cells takes one hit per
/// adjacency, so chains and obsidian can lose multiple levels in a
/// single resolution. Finally, with probability `ice_spread_rate`, one
/// uniformly random unfrozen non-empty tile freezes.
pub fn resolve_hazards(
    grid: &Grid,
    cleared: &[Position],
    ice_spread_rate: f32,
    rng: &mut SessionRng,
) -> (Grid, Vec<HazardChange>) {
    let mut next = grid.clone();
    let mut changes = Vec::new();

    for &pos in cleared {
        let tile = next.get_mut(pos);
        if tile.jelly_level > 0 {
            tile.jelly_level -= 1;
            changes.push(HazardChange {
                pos,
                kind: tile.kind,
                effect: HazardEffect::JellyCleared {
                    level: tile.jelly_level,
                },
            });
        }

        let neighbors: Vec<Position> = next.neighbors(pos).collect();
        for neighbor in neighbors {
            let tile = next.get_mut(neighbor);
            let kind = tile.kind;

            if tile.frozen {
                tile.frozen = false;
                changes.push(HazardChange {
                    pos: neighbor,
                    kind,
                    effect: HazardEffect::Unfrozen,
                });
            }

            if tile.chain_level > 0 {
                tile.chain_level -= 1;
                changes.push(HazardChange {
                    pos: neighbor,
                    kind,
                    effect: HazardEffect::ChainWeakened {
                        level: tile.chain_level,
                    },
                });
            }

            if kind.is_single_hit_obstacle() && !tile.dying {
                tile.dying = true;
                changes.push(HazardChange {
                    pos: neighbor,
                    kind,
                    effect: HazardEffect::Broken,
                });
            }

            if kind == TileKind::Obsidian
                && let Some(health) = tile.health
                && health > 0
                && !tile.dying
            {
                let health = health - 1;
                tile.health = Some(health);
                if health == 0 {
                    tile.dying = true;
                    changes.push(HazardChange {
                        pos: neighbor,
                        kind,
                        effect: HazardEffect::Broken,
                    });
                } else {
                    changes.push(HazardChange {
                        pos: neighbor,
                        kind,
                        effect: HazardEffect::ObsidianHit { health },
                    });
                }
            }
        }
    }

    if rng.random_chance(ice_spread_rate) {
        let candidates: Vec<Position> = next
            .positions()
            .filter(|&pos| {
                let tile = next.get(pos);
                !tile.frozen && !tile.is_empty()
            })
            .collect();

        if !candidates.is_empty() {
            let target = *rng.pick(&candidates);
            let tile = next.get_mut(target);
            tile.frozen = true;
            changes.push(HazardChange {
                pos: target,
                kind: tile.kind,
                effect: HazardEffect::Frozen,
            });
        }
    }

    (next, changes)
}
