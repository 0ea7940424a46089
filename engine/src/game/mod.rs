mod game_state;
mod settings;
mod snake;

pub use game_state::{SnakeGameState, TickOutcome};
pub use settings::SnakeSettings;
pub use snake::Snake;
