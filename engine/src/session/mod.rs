mod combo;
mod config;
mod events;
mod game_session;
mod rating;

pub use combo::{ComboConfig, ComboState};
pub use config::LevelConfig;
pub use events::GameEvent;
pub use game_session::{
    ClickOutcome, ClickResult, GameSession, MATCH_CLEAR_DELAY_MS, MATCH_SCORE_PER_TILE,
    MATCH_SIZE_BONUS, MAX_SHUFFLE_ATTEMPTS, POWER_UP_CLEAR_DELAY_MS, POWER_UP_SCORE_PER_TILE,
    POWER_UP_SPAWN_MIN_MATCH, RejectReason, SHUFFLE_DELAY_MS, SessionStatus,
};
pub use rating::{is_level_won, star_rating};
