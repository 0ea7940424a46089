use std::fmt;

use snake_engine::game::SnakeGameState;
use snake_engine::GameEndReason;

#[derive(Clone, Debug, PartialEq)]
pub struct GameReport {
    pub seed: u64,
    pub score: u32,
    pub length: usize,
    pub cells: usize,
    pub ticks: u64,
    /// `None` when the tick limit was reached first.
    pub end_reason: Option<GameEndReason>,
}

impl GameReport {
    pub fn from_state(seed: u64, state: &SnakeGameState) -> Self {
        Self {
            seed,
            score: state.score,
            length: state.snake.len(),
            cells: state.field_size().cell_count(),
            ticks: state.ticks,
            end_reason: state.game_end_reason,
        }
    }

    pub fn outcome(&self) -> &'static str {
        match self.end_reason {
            Some(GameEndReason::BoardFilled) => "board filled",
            Some(GameEndReason::WallCollision) => "hit wall",
            Some(GameEndReason::SelfCollision) => "hit itself",
            None => "tick limit",
        }
    }

    pub fn fill_percent(&self) -> f64 {
        if self.cells == 0 {
            return 0.0;
        }
        self.length as f64 * 100.0 / self.cells as f64
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationSummary {
    pub games: u32,
    pub total_score: u64,
    pub best_score: u32,
    pub total_ticks: u64,
    pub boards_filled: u32,
    pub collisions: u32,
    pub unfinished: u32,
}

impl SimulationSummary {
    pub fn record(&mut self, report: &GameReport) {
        self.games += 1;
        self.total_score += report.score as u64;
        self.best_score = self.best_score.max(report.score);
        self.total_ticks += report.ticks;
        match report.end_reason {
            Some(GameEndReason::BoardFilled) => self.boards_filled += 1,
            Some(GameEndReason::WallCollision | GameEndReason::SelfCollision) => self.collisions += 1,
            None => self.unfinished += 1,
        }
    }

    pub fn mean_score(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.games as f64
    }
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games played:   {}", self.games)?;
        writeln!(f, "Mean score:     {:.2}", self.mean_score())?;
        writeln!(f, "Best score:     {}", self.best_score)?;
        writeln!(f, "Total ticks:    {}", self.total_ticks)?;
        writeln!(f, "Boards filled:  {}", self.boards_filled)?;
        writeln!(f, "Collisions:     {}", self.collisions)?;
        write!(f, "Tick limit hit: {}", self.unfinished)
    }
}
