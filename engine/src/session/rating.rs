use std::collections::BTreeMap;

use super::config::LevelConfig;
use crate::board::TileKind;

/// The level is won once every target has been driven to zero.
pub fn is_level_won(targets_left: &BTreeMap<TileKind, u32>) -> bool {
    targets_left.values().all(|&count| count == 0)
}

/// Post-win star rating. The baseline is ten points per target unit;
/// beating it by 50% earns three stars, by 20% two, any win one.
pub fn star_rating(score: u32, config: &LevelConfig) -> u8 {
    let baseline = config.targets.values().sum::<u32>() * 10;
    let score = score as f64;
    let baseline = baseline as f64;
    if score >= baseline * 1.5 {
        3
    } else if score >= baseline * 1.2 {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_target_sum(sum: u32) -> LevelConfig {
        LevelConfig {
            targets: BTreeMap::from([(TileKind::Red, sum)]),
            ..LevelConfig::procedural(51)
        }
    }

    #[test]
    fn test_win_requires_all_targets_cleared() {
        let mut targets = BTreeMap::from([(TileKind::Red, 0), (TileKind::Blue, 3)]);
        assert!(!is_level_won(&targets));
        targets.insert(TileKind::Blue, 0);
        assert!(is_level_won(&targets));
    }

    #[test]
    fn test_empty_target_map_counts_as_won() {
        assert!(is_level_won(&BTreeMap::new()));
    }

    #[test]
    fn test_star_thresholds() {
        // Baseline is 100 points for a 10-unit target.
        let config = config_with_target_sum(10);
        assert_eq!(star_rating(99, &config), 1);
        assert_eq!(star_rating(119, &config), 1);
        assert_eq!(star_rating(120, &config), 2);
        assert_eq!(star_rating(149, &config), 2);
        assert_eq!(star_rating(150, &config), 3);
        assert_eq!(star_rating(500, &config), 3);
    }
}
