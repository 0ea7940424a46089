use crate::{log, log_warn};
use crate::types::{Direction, FieldSize, Point};
use super::cycle::HamiltonianCycle;
use super::grid::{GridModel, NavigationState};
use super::navigator::NavigationController;
use super::path_planner::PathPlanner;

/// Fill ratio above which the threshold tightens.
const CAUTIOUS_FILL: f64 = 0.5;
const CAUTIOUS_THRESHOLD: f64 = 0.5;
const RELAXED_THRESHOLD: f64 = 0.7;

const DIRECT_PATH_MAX_FILL: f64 = 0.3;
const GREEDY_SHORTCUT_MAX_FILL: f64 = 0.6;
const GUARDED_PATH_MAX_FILL: f64 = 0.5;
/// Food at most this fraction of the cycle ahead is reached by plain cycle following.
const FOOD_AHEAD_FRACTION: f64 = 1.0 / 3.0;

/// Snakes shorter than this cannot trap themselves.
const SHORT_SNAKE_LEN: usize = 5;
const BACKWARD_MOVE_MAX_FILL: f64 = 0.4;
const ADVANCE_SLACK_MAX_FILL: f64 = 0.3;

/// Returned when nothing is free; the caller will register the collision.
const FALLBACK_DIRECTION: Direction = Direction::Up;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationMode {
    ShortcutSeeking,
    SafeCycleFollowing,
}

/// Follows a Hamiltonian cycle of the field, cutting across it toward the food
/// while the board is sparse enough for the shortcut heuristics to hold.
///
/// The shortcut checks are heuristics, not reachability proofs. A shortcut can
/// box the snake in at any length: the direct path taken on a sparse board is
/// not checked at all and may lead into a pocket well before the field fills up.
pub struct CycleSafeController {
    cycle: HamiltonianCycle,
}

impl CycleSafeController {
    pub fn new(field_size: FieldSize) -> Self {
        Self {
            cycle: Self::build_cycle(field_size),
        }
    }

    fn build_cycle(field_size: FieldSize) -> HamiltonianCycle {
        let cycle = HamiltonianCycle::build(field_size);
        if cycle.is_closed() {
            log!(
                "Built Hamiltonian cycle for {}x{} field ({} cells)",
                field_size.width,
                field_size.height,
                cycle.len()
            );
        } else {
            log_warn!(
                "{}x{} field has no Hamiltonian cycle, following an open sweep instead",
                field_size.width,
                field_size.height
            );
        }
        cycle
    }

    pub fn cycle(&self) -> &HamiltonianCycle {
        &self.cycle
    }

    pub fn select_mode(fill_ratio: f64) -> NavigationMode {
        let threshold = if fill_ratio > CAUTIOUS_FILL {
            CAUTIOUS_THRESHOLD
        } else {
            RELAXED_THRESHOLD
        };
        if fill_ratio > threshold {
            NavigationMode::SafeCycleFollowing
        } else {
            NavigationMode::ShortcutSeeking
        }
    }

    pub fn mode_for(&self, state: &NavigationState) -> NavigationMode {
        Self::select_mode(GridModel::new(state).fill_ratio())
    }

    /// Cheap admissibility check for stepping the head onto `candidate`.
    pub fn is_virtually_safe(&self, grid: &GridModel, candidate: Point) -> bool {
        if grid.snake_len() < SHORT_SNAKE_LEN {
            return true;
        }
        let (Some(head), Some(tail)) = (grid.head(), grid.tail()) else {
            return true;
        };
        if candidate == tail {
            return true;
        }

        let (Some(candidate_idx), Some(head_idx), Some(tail_idx)) = (
            self.cycle.index_of(candidate),
            self.cycle.index_of(head),
            self.cycle.index_of(tail),
        ) else {
            return false;
        };

        let half = self.cycle.len() as f64 / 2.0;
        let advance = self.cycle.forward_distance(head_idx, candidate_idx);
        if advance as f64 <= half {
            return true;
        }

        let tail_ahead_of_head = self.cycle.forward_distance(head_idx, tail_idx);
        if tail_ahead_of_head > 0 && (tail_ahead_of_head as f64) < half {
            return true;
        }

        let tail_ahead_of_candidate = self.cycle.forward_distance(candidate_idx, tail_idx);
        let short_enough =
            (grid.snake_len() as f64) < BACKWARD_MOVE_MAX_FILL * grid.field_size().cell_count() as f64;
        (tail_ahead_of_candidate as f64) < half && short_enough
    }

    pub fn is_safe_to_advance(&self, grid: &GridModel, candidate_idx: usize, head_idx: usize) -> bool {
        let advance = self.cycle.forward_distance(head_idx, candidate_idx);
        if advance as f64 <= self.cycle.len() as f64 / 2.0 {
            return true;
        }

        if grid.fill_ratio() < ADVANCE_SLACK_MAX_FILL
            && let Some(tail_idx) = grid.tail().and_then(|tail| self.cycle.index_of(tail))
        {
            return self.cycle.forward_distance(head_idx, tail_idx) > advance;
        }
        false
    }

    /// The strict cycle step from the current head, whatever the fill ratio.
    pub fn next_cycle_move(&self, state: &NavigationState) -> Direction {
        let grid = GridModel::new(state);
        match self.head_index(&grid) {
            Some((head, head_idx)) => self.follow_cycle(&grid, head, head_idx),
            None => Self::emergency_direction(&grid),
        }
    }

    fn head_index(&self, grid: &GridModel) -> Option<(Point, usize)> {
        let head = grid.head()?;
        if grid.field_size() != self.cycle.field_size() {
            log_warn!(
                "Cycle was built for {}x{} but the field is {}x{}",
                self.cycle.field_size().width,
                self.cycle.field_size().height,
                grid.field_size().width,
                grid.field_size().height
            );
            return None;
        }
        match self.cycle.index_of(head) {
            Some(head_idx) => Some((head, head_idx)),
            None => {
                log_warn!("Head ({}, {}) is not on the cycle", head.x, head.y);
                None
            }
        }
    }

    fn follow_cycle(&self, grid: &GridModel, head: Point, head_idx: usize) -> Direction {
        let next = self.cycle.successor(head_idx);
        Direction::between(head, next).unwrap_or_else(|| Self::emergency_direction(grid))
    }

    fn emergency_direction(grid: &GridModel) -> Direction {
        if let Some((direction, _)) = grid.open_moves().first() {
            return *direction;
        }
        log_warn!("Every direction is blocked");
        FALLBACK_DIRECTION
    }

    fn seek_shortcut(&self, grid: &GridModel, head: Point, head_idx: usize, food_idx: usize) -> Option<Direction> {
        let fill = grid.fill_ratio();
        let food = grid.food();
        let half = self.cycle.len() as f64 / 2.0;

        let planned = if fill < GUARDED_PATH_MAX_FILL {
            PathPlanner::new(grid.field_size()).find_path(head, food, |p| grid.is_blocked(p))
        } else {
            None
        };

        if fill < DIRECT_PATH_MAX_FILL
            && let Some(direction) = planned.as_deref().and_then(PathPlanner::first_step)
        {
            return Some(direction);
        }

        let moves = grid.open_moves();

        if fill < GREEDY_SHORTCUT_MAX_FILL {
            let head_distance = head.manhattan_distance(food);
            let mut ranked = moves.clone();
            ranked.sort_by_key(|(_, pos)| pos.manhattan_distance(food));

            for (direction, pos) in ranked {
                let Some(pos_idx) = self.cycle.index_of(pos) else {
                    continue;
                };
                let cycle_to_food = self.cycle.forward_distance(pos_idx, food_idx);
                let gains = (cycle_to_food as f64) < half || pos.manhattan_distance(food) < head_distance;
                if gains && self.is_virtually_safe(grid, pos) {
                    return Some(direction);
                }
            }
        }

        if let Some(direction) = self.food_ahead_step(grid, head, head_idx, food_idx) {
            return Some(direction);
        }

        if let Some(path) = planned.as_deref()
            && let Some(direction) = PathPlanner::first_step(path)
            && self.is_virtually_safe(grid, path[1])
        {
            return Some(direction);
        }

        self.best_scored_move(grid, &moves, head_idx)
    }

    /// Plain cycle step when the food is close enough ahead along the cycle.
    ///
    /// Below the greedy shortcut's fill limit this step is always accepted there
    /// first: it advances by one and leaves the food under half a cycle away.
    fn food_ahead_step(&self, grid: &GridModel, head: Point, head_idx: usize, food_idx: usize) -> Option<Direction> {
        let food_ahead = self.cycle.forward_distance(head_idx, food_idx);
        if (food_ahead as f64) > self.cycle.len() as f64 * FOOD_AHEAD_FRACTION {
            return None;
        }
        let next = self.cycle.successor(head_idx);
        if grid.is_occupied(next) {
            return None;
        }
        Direction::between(head, next)
    }

    fn best_scored_move(&self, grid: &GridModel, moves: &[(Direction, Point)], head_idx: usize) -> Option<Direction> {
        let cycle_len = self.cycle.len() as i64;
        let food = grid.food();

        let mut best: Option<(i64, Direction)> = None;
        for (direction, pos) in moves {
            let Some(pos_idx) = self.cycle.index_of(*pos) else {
                continue;
            };
            let remaining = cycle_len - self.cycle.forward_distance(head_idx, pos_idx) as i64;
            let distance = pos.manhattan_distance(food) as i64;
            let score = if self.is_safe_to_advance(grid, pos_idx, head_idx) {
                2 * remaining - 3 * distance
            } else {
                remaining - distance
            };
            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, *direction));
            }
        }
        best.map(|(_, direction)| direction)
    }
}

impl NavigationController for CycleSafeController {
    fn determine_next_move(&self, state: &NavigationState) -> Direction {
        let grid = GridModel::new(state);
        let Some((head, head_idx)) = self.head_index(&grid) else {
            return Self::emergency_direction(&grid);
        };

        match Self::select_mode(grid.fill_ratio()) {
            NavigationMode::SafeCycleFollowing => self.follow_cycle(&grid, head, head_idx),
            NavigationMode::ShortcutSeeking => {
                let Some(food_idx) = self.cycle.index_of(state.food) else {
                    log_warn!("Food ({}, {}) is not on the cycle", state.food.x, state.food.y);
                    return Self::emergency_direction(&grid);
                };
                self.seek_shortcut(&grid, head, head_idx, food_idx)
                    .unwrap_or_else(|| self.follow_cycle(&grid, head, head_idx))
            }
        }
    }

    fn reset(&mut self, field_size: FieldSize) {
        self.cycle = Self::build_cycle(field_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Body laid along the cycle, head at `head_idx` and the rest trailing behind it.
    fn snake_on_cycle(cycle: &HamiltonianCycle, head_idx: usize, len: usize) -> Vec<Point> {
        let n = cycle.len();
        (0..len).map(|i| cycle.cell_at(head_idx + n - i)).collect()
    }

    fn direction_of(snake: &[Point]) -> Direction {
        Direction::between(snake[1], snake[0]).unwrap_or(Direction::Right)
    }

    #[test]
    fn test_mode_thresholds() {
        assert_eq!(CycleSafeController::select_mode(0.1), NavigationMode::ShortcutSeeking);
        assert_eq!(CycleSafeController::select_mode(0.5), NavigationMode::ShortcutSeeking);
        assert_eq!(CycleSafeController::select_mode(0.51), NavigationMode::SafeCycleFollowing);
        assert_eq!(CycleSafeController::select_mode(0.9), NavigationMode::SafeCycleFollowing);
    }

    #[test]
    fn test_safe_following_never_steps_onto_body() {
        let field = FieldSize::new(6, 6);
        let controller = CycleSafeController::new(field);
        let cycle = controller.cycle();
        let n = cycle.len();

        for head_idx in 0..n {
            for len in 3..n {
                let snake = snake_on_cycle(cycle, head_idx, len);
                let food = cycle.successor(head_idx);
                let state = NavigationState::new(&snake, food, field, direction_of(&snake));
                let grid = GridModel::new(&state);

                let direction = controller.next_cycle_move(&state);
                let target = snake[0].step(direction);
                assert_eq!(target, cycle.successor(head_idx));
                assert!(!grid.is_occupied(target), "head {} len {} collides", head_idx, len);

                if controller.mode_for(&state) == NavigationMode::SafeCycleFollowing {
                    assert_eq!(controller.determine_next_move(&state), direction);
                }
            }
        }
    }

    #[test]
    fn test_short_snake_is_always_virtually_safe() {
        let field = FieldSize::new(6, 6);
        let controller = CycleSafeController::new(field);
        let snake = snake_on_cycle(controller.cycle(), 20, 4);
        let state = NavigationState::new(&snake, Point::new(0, 0), field, direction_of(&snake));
        let grid = GridModel::new(&state);

        for cell in controller.cycle().cells() {
            assert!(controller.is_virtually_safe(&grid, *cell));
        }
    }

    #[test]
    fn test_backward_move_rejected_for_long_snake() {
        // 6x6 cycle: the head sits at index 20, (3, 1), and the tail at index 6, (1, 5).
        let field = FieldSize::new(6, 6);
        let controller = CycleSafeController::new(field);
        let cycle = controller.cycle();
        let snake = snake_on_cycle(cycle, 20, 15);
        assert_eq!(snake[0], Point::new(3, 1));
        assert_eq!(snake[14], Point::new(1, 5));

        let state = NavigationState::new(&snake, Point::new(0, 0), field, direction_of(&snake));
        let grid = GridModel::new(&state);

        // Index 3 is 19 steps ahead of the head, more than half the cycle.
        assert!(!controller.is_virtually_safe(&grid, cycle.cell_at(3)));
        assert!(controller.is_virtually_safe(&grid, cycle.cell_at(21)));
        assert!(controller.is_virtually_safe(&grid, snake[14]));

        assert!(!controller.is_safe_to_advance(&grid, 3, 20));
        assert!(controller.is_safe_to_advance(&grid, 21, 20));
    }

    #[test]
    fn test_backward_move_allowed_for_short_snake_near_tail() {
        let field = FieldSize::new(6, 6);
        let controller = CycleSafeController::new(field);
        let cycle = controller.cycle();
        let snake = snake_on_cycle(cycle, 15, 6);
        let state = NavigationState::new(&snake, Point::new(0, 0), field, direction_of(&snake));
        let grid = GridModel::new(&state);

        // (1, 5) is index 6: backward, but the tail at index 10 is only 4 steps past it.
        assert!(controller.is_virtually_safe(&grid, cycle.cell_at(6)));

        // Under 30% fill the head-to-tail gap (31) buys slack for a 27-step advance.
        assert!(controller.is_safe_to_advance(&grid, 6, 15));
        assert!(!controller.is_safe_to_advance(&grid, 14, 15));
    }

    #[test]
    fn test_sparse_board_takes_direct_path() {
        let field = FieldSize::new(10, 10);
        let controller = CycleSafeController::new(field);
        let snake = [Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)];
        let state = NavigationState::new(&snake, Point::new(5, 1), field, Direction::Right);
        assert_eq!(controller.determine_next_move(&state), Direction::Up);
    }

    #[test]
    fn test_greedy_shortcut_skips_move_without_gain() {
        // Head at index 16, (3, 5), tail at index 6, (1, 5). Fill 11/36 rules out the direct path.
        let field = FieldSize::new(6, 6);
        let controller = CycleSafeController::new(field);
        let cycle = controller.cycle();
        let snake = snake_on_cycle(cycle, 16, 11);
        let food = Point::new(0, 5);
        let state = NavigationState::new(&snake, food, field, direction_of(&snake));
        let grid = GridModel::new(&state);

        // Up and Right both end 4 away from the food. Up (index 17) leaves it 24
        // steps ahead on the cycle; Right (index 25) leaves it 16 ahead.
        let up = snake[0].step(Direction::Up);
        assert!(controller.is_virtually_safe(&grid, up));
        assert_eq!(cycle.forward_distance(cycle.index_of(up).unwrap(), 5), 24);

        assert_eq!(controller.determine_next_move(&state), Direction::Right);
    }

    #[test]
    fn test_food_ahead_step_within_a_third_of_the_cycle() {
        let field = FieldSize::new(6, 6);
        let controller = CycleSafeController::new(field);
        let cycle = controller.cycle();
        let snake = snake_on_cycle(cycle, 16, 11);

        let near = cycle.cell_at(28);
        let state = NavigationState::new(&snake, near, field, direction_of(&snake));
        let grid = GridModel::new(&state);
        assert_eq!(controller.food_ahead_step(&grid, snake[0], 16, 28), Some(Direction::Up));
        // The greedy shortcut reaches the same step first.
        assert_eq!(controller.determine_next_move(&state), Direction::Up);

        let far = cycle.cell_at(29);
        let state = NavigationState::new(&snake, far, field, direction_of(&snake));
        let grid = GridModel::new(&state);
        assert_eq!(controller.food_ahead_step(&grid, snake[0], 16, 29), None);
    }

    #[test]
    fn test_scored_move_weights_safe_advance() {
        // The head is walled into columns 0 and 1, away from the food.
        let field = FieldSize::new(6, 6);
        let controller = CycleSafeController::new(field);
        let snake = [
            Point::new(1, 2),
            Point::new(1, 1),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(2, 3),
            Point::new(2, 4),
            Point::new(2, 5),
            Point::new(1, 5),
        ];
        let food = Point::new(4, 5);
        let state = NavigationState::new(&snake, food, field, Direction::Down);
        let grid = GridModel::new(&state);
        assert!(PathPlanner::new(field).find_path(snake[0], food, |p| grid.is_blocked(p)).is_none());

        // Down (index 8) is a 35-step advance and fails the advance check: 1 - 5 = -4.
        // Left (index 2) advances 29 with the tail 33 ahead: 2 * 7 - 3 * 7 = -7.
        assert!(!controller.is_safe_to_advance(&grid, 8, 9));
        assert!(controller.is_safe_to_advance(&grid, 2, 9));
        assert!(!controller.is_virtually_safe(&grid, Point::new(1, 3)));

        assert_eq!(controller.determine_next_move(&state), Direction::Down);
    }

    #[test]
    fn test_food_off_the_cycle_uses_emergency_scan() {
        let field = FieldSize::new(6, 6);
        let controller = CycleSafeController::new(field);
        let snake = [Point::new(3, 3), Point::new(3, 2), Point::new(3, 1)];
        let state = NavigationState::new(&snake, Point::new(6, 3), field, Direction::Down);

        assert_eq!(controller.mode_for(&state), NavigationMode::ShortcutSeeking);
        assert_eq!(controller.determine_next_move(&state), Direction::Right);
    }

    #[test]
    fn test_decision_is_repeatable() {
        let field = FieldSize::new(6, 6);
        let controller = CycleSafeController::new(field);
        let snake = snake_on_cycle(controller.cycle(), 17, 14);
        let state = NavigationState::new(&snake, Point::new(0, 2), field, direction_of(&snake));
        assert_eq!(controller.determine_next_move(&state), controller.determine_next_move(&state));
    }

    #[test]
    fn test_mid_fill_choice_does_not_collide() {
        let field = FieldSize::new(6, 6);
        let controller = CycleSafeController::new(field);
        let cycle = controller.cycle();

        for head_idx in 0..cycle.len() {
            for len in 11..=18 {
                let snake = snake_on_cycle(cycle, head_idx, len);
                let food = cycle.cell_at(head_idx + 5);
                let state = NavigationState::new(&snake, food, field, direction_of(&snake));
                let grid = GridModel::new(&state);
                if grid.open_moves().is_empty() {
                    continue;
                }
                let direction = controller.determine_next_move(&state);
                assert!(!grid.is_occupied(snake[0].step(direction)));
            }
        }
    }

    #[test]
    fn test_stale_cycle_uses_emergency_scan_until_reset() {
        let mut controller = CycleSafeController::new(FieldSize::new(10, 10));
        let field = FieldSize::new(12, 12);
        let snake = [Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)];
        let state = NavigationState::new(&snake, Point::new(9, 5), field, Direction::Right);

        assert_eq!(controller.determine_next_move(&state), Direction::Up);

        controller.reset(field);
        assert_eq!(controller.cycle().len(), 144);
        assert_eq!(controller.determine_next_move(&state), Direction::Right);
    }

    #[test]
    fn test_boxed_in_head_returns_fallback() {
        let field = FieldSize::new(4, 4);
        let controller = CycleSafeController::new(field);
        let snake = [
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(0, 1),
            Point::new(0, 2),
        ];
        let state = NavigationState::new(&snake, Point::new(3, 3), field, Direction::Left);
        let direction = controller.determine_next_move(&state);
        let grid = GridModel::new(&state);
        assert!(grid.is_occupied(snake[0].step(direction)));
    }
}
