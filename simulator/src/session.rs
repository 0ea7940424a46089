use std::thread;

use snake_engine::config::SimulationConfig;
use snake_engine::game::{SnakeGameState, SnakeSettings};
use snake_engine::navigation::Navigator;
use snake_engine::SessionRng;

use crate::report::GameReport;

/// One game from reset to its end (or the tick limit).
pub struct SimulationSession {
    game_state: SnakeGameState,
    navigator: Navigator,
    rng: SessionRng,
}

impl SimulationSession {
    pub fn new(config: &SimulationConfig, seed: u64) -> Self {
        let settings = SnakeSettings::from(config);
        let mut rng = SessionRng::new(seed);
        let navigator = Navigator::new(config.navigator, settings.field_size);
        let game_state = SnakeGameState::new(settings, &mut rng);

        Self {
            game_state,
            navigator,
            rng,
        }
    }

    /// With `realtime` set, sleeps the current tick interval before each tick.
    pub fn run(&mut self, max_ticks: u64, realtime: bool) -> GameReport {
        while !self.game_state.is_over() && self.game_state.ticks < max_ticks {
            if realtime {
                thread::sleep(self.game_state.tick_interval());
            }
            self.game_state.update(&self.navigator, &mut self.rng);
        }
        GameReport::from_state(self.rng.seed(), &self.game_state)
    }
}
