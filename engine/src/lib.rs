pub mod config;
pub mod game;
pub mod logger;
pub mod navigation;
pub mod types;
mod session_rng;

pub use session_rng::SessionRng;
pub use types::{Direction, FieldSize, GameEndReason, Point};
