use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;
use crate::navigation::NavigatorType;
use super::Validate;

pub const MIN_FIELD_SIDE: usize = 4;
pub const MAX_FIELD_SIDE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub field_width: usize,
    pub field_height: usize,
    pub navigator: NavigatorType,
    pub games: u32,
    pub max_ticks: u64,
    /// Seed of the first game; later games use consecutive seeds.
    pub seed: Option<u64>,
    pub base_tick_ms: u64,
    pub min_tick_ms: u64,
    pub speed_increase_factor: f64,
    pub log_level: LogLevel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            field_width: 30,
            field_height: 20,
            navigator: NavigatorType::CycleSafe,
            games: 1,
            max_ticks: 200_000,
            seed: None,
            base_tick_ms: 120,
            min_tick_ms: 70,
            speed_increase_factor: 0.98,
            log_level: LogLevel::Info,
        }
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<(), String> {
        let side = MIN_FIELD_SIDE..=MAX_FIELD_SIDE;
        if !side.contains(&self.field_width) {
            return Err(format!(
                "Field width must be between {} and {}",
                MIN_FIELD_SIDE, MAX_FIELD_SIDE
            ));
        }
        if !side.contains(&self.field_height) {
            return Err(format!(
                "Field height must be between {} and {}",
                MIN_FIELD_SIDE, MAX_FIELD_SIDE
            ));
        }
        if self.games < 1 {
            return Err("At least one game must be played".to_string());
        }
        if self.max_ticks < 1 {
            return Err("Max ticks must be at least 1".to_string());
        }
        if self.min_tick_ms < 1 || self.min_tick_ms > self.base_tick_ms {
            return Err("Min tick must be between 1ms and the base tick".to_string());
        }
        if !(self.speed_increase_factor > 0.0 && self.speed_increase_factor <= 1.0) {
            return Err("Speed increase factor must be in (0, 1]".to_string());
        }
        Ok(())
    }
}
