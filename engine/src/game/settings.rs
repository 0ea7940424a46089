use crate::config::SimulationConfig;
use crate::types::FieldSize;

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSettings {
    pub field_size: FieldSize,
    pub base_tick_ms: f64,
    pub min_tick_ms: f64,
    pub speed_increase_factor: f64,
}

impl SnakeSettings {
    /// Interval after one more piece of food, never below the minimum.
    pub fn next_tick_ms(&self, current_ms: f64) -> f64 {
        (current_ms * self.speed_increase_factor).max(self.min_tick_ms)
    }
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

impl From<&SimulationConfig> for SnakeSettings {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            field_size: FieldSize::new(config.field_width, config.field_height),
            base_tick_ms: config.base_tick_ms as f64,
            min_tick_ms: config.min_tick_ms as f64,
            speed_increase_factor: config.speed_increase_factor,
        }
    }
}
