pub mod board;
pub mod session;

mod session_rng;

pub use session_rng::SessionRng;
