use crate::types::{Direction, FieldSize, Point};
use super::grid::{GridModel, NavigationState};
use super::navigator::NavigationController;
use super::path_planner::PathPlanner;

/// Chases the food along the shortest path, falling back to a greedy step when
/// the food is walled off.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReactiveController;

impl ReactiveController {
    pub fn new() -> Self {
        Self
    }

    /// Axis with the larger gap first (vertical wins ties), then every other
    /// direction in fixed order. Returns the current direction when all collide.
    pub fn greedy_direction(grid: &GridModel) -> Direction {
        let Some(head) = grid.head() else {
            return grid.current_direction();
        };

        Self::preferred_directions(head, grid.food())
            .into_iter()
            .chain(Direction::ALL)
            .find(|direction| !grid.is_occupied(head.step(*direction)))
            .unwrap_or_else(|| grid.current_direction())
    }

    fn preferred_directions(head: Point, food: Point) -> Vec<Direction> {
        let dx = food.x - head.x;
        let dy = food.y - head.y;

        let horizontal = match dx.signum() {
            1 => Some(Direction::Right),
            -1 => Some(Direction::Left),
            _ => None,
        };
        let vertical = match dy.signum() {
            1 => Some(Direction::Down),
            -1 => Some(Direction::Up),
            _ => None,
        };

        if dx.abs() > dy.abs() {
            [horizontal, vertical].into_iter().flatten().collect()
        } else {
            [vertical, horizontal].into_iter().flatten().collect()
        }
    }
}

impl NavigationController for ReactiveController {
    fn determine_next_move(&self, state: &NavigationState) -> Direction {
        let grid = GridModel::new(state);
        let Some(head) = grid.head() else {
            return state.current_direction;
        };

        let planner = PathPlanner::new(state.field_size);
        if let Some(path) = planner.find_path(head, state.food, |p| grid.is_blocked(p))
            && let Some(direction) = PathPlanner::first_step(&path)
        {
            return direction;
        }

        Self::greedy_direction(&grid)
    }

    fn reset(&mut self, _field_size: FieldSize) {}
}
