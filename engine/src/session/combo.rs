use serde::{Deserialize, Serialize};

/// Streak tuning: the multiplier table is indexed by combo level
/// (level 0 means no streak and is never looked up) and the window is
/// how long a streak stays alive between matches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComboConfig {
    pub multipliers: Vec<f32>,
    pub timeout_ms: i64,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            multipliers: vec![1.0, 1.0, 1.5, 2.0, 2.5, 3.0],
            timeout_ms: 3000,
        }
    }
}

impl ComboConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.multipliers.len() < 2 {
            return Err("Combo multiplier table needs at least levels 0 and 1".to_string());
        }
        if self.multipliers.iter().any(|&m| m <= 0.0) {
            return Err("Combo multipliers must be positive".to_string());
        }
        if self.timeout_ms <= 0 {
            return Err("Combo timeout must be positive".to_string());
        }
        Ok(())
    }

    pub fn max_level(&self) -> u32 {
        self.multipliers.len() as u32 - 1
    }
}

/// Time-windowed match streak. The window is evaluated when the next
/// match is scored, never by a background timer, so sessions driven by
/// a virtual clock behave identically to live ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComboState {
    pub level: u32,
    pub multiplier: f32,
    pub last_match_ms: i64,
}

impl ComboState {
    pub fn idle() -> Self {
        Self {
            level: 0,
            multiplier: 1.0,
            last_match_ms: 0,
        }
    }

    /// Advances the streak for a scoring match at `now_ms`: within the
    /// window the level climbs (capped at the table end), otherwise the
    /// streak restarts at level 1.
    pub fn register_match(&mut self, now_ms: i64, config: &ComboConfig) {
        let in_window = self.level > 0 && now_ms - self.last_match_ms < config.timeout_ms;
        self.level = if in_window {
            (self.level + 1).min(config.max_level())
        } else {
            1
        };
        self.multiplier = config.multipliers[self.level as usize];
        self.last_match_ms = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_starts_at_level_one() {
        let config = ComboConfig::default();
        let mut combo = ComboState::idle();
        combo.register_match(1_000, &config);
        assert_eq!(combo.level, 1);
        assert_eq!(combo.multiplier, config.multipliers[1]);
    }

    #[test]
    fn test_matches_inside_window_climb() {
        let config = ComboConfig::default();
        let mut combo = ComboState::idle();
        combo.register_match(0, &config);
        combo.register_match(1_000, &config);
        combo.register_match(2_000, &config);
        assert_eq!(combo.level, 3);
        assert_eq!(combo.multiplier, config.multipliers[3]);
    }

    #[test]
    fn test_level_caps_at_table_end() {
        let config = ComboConfig::default();
        let mut combo = ComboState::idle();
        let mut now = 0;
        for _ in 0..20 {
            combo.register_match(now, &config);
            now += 100;
        }
        assert_eq!(combo.level, config.max_level());
    }

    #[test]
    fn test_match_after_timeout_resets_to_one() {
        let config = ComboConfig::default();
        let mut combo = ComboState::idle();
        combo.register_match(0, &config);
        combo.register_match(1_000, &config);
        assert_eq!(combo.level, 2);

        combo.register_match(1_000 + config.timeout_ms, &config);
        assert_eq!(combo.level, 1);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let config = ComboConfig::default();
        let mut combo = ComboState::idle();
        combo.register_match(0, &config);
        // Exactly at the window edge counts as expired.
        combo.register_match(config.timeout_ms, &config);
        assert_eq!(combo.level, 1);

        combo.register_match(config.timeout_ms * 2 - 1, &config);
        assert_eq!(combo.level, 2);
    }

    #[test]
    fn test_config_validation() {
        assert!(ComboConfig::default().validate().is_ok());
        let bad = ComboConfig {
            multipliers: vec![1.0],
            timeout_ms: 3000,
        };
        assert!(bad.validate().is_err());
        let bad = ComboConfig {
            multipliers: vec![1.0, 0.0],
            timeout_ms: 3000,
        };
        assert!(bad.validate().is_err());
    }
}
