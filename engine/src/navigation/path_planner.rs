use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::types::{Direction, FieldSize, Point};

/// Open-set entry. Ordered by `f`, then by the cell's first insertion into the
/// open set, so equal-cost ties always resolve to the earliest discovered node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenEntry {
    f_score: u32,
    inserted: u64,
    cell: usize,
}

/// A* over the 4-connected grid with unit step cost and a Manhattan heuristic.
#[derive(Clone, Copy, Debug)]
pub struct PathPlanner {
    field_size: FieldSize,
}

impl PathPlanner {
    pub fn new(field_size: FieldSize) -> Self {
        Self { field_size }
    }

    /// Shortest route from `start` to `goal` inclusive, avoiding every cell for
    /// which `is_blocked` holds. The start cell itself is never tested.
    pub fn find_path<F>(&self, start: Point, goal: Point, is_blocked: F) -> Option<Vec<Point>>
    where
        F: Fn(Point) -> bool,
    {
        let field = self.field_size;
        let start_idx = field.flat_index(start)?;
        let goal_idx = field.flat_index(goal)?;

        let cells = field.cell_count();
        let mut g_score = vec![u32::MAX; cells];
        let mut came_from: Vec<Option<usize>> = vec![None; cells];
        let mut closed = vec![false; cells];
        let mut insertion: Vec<Option<u64>> = vec![None; cells];
        let mut next_insertion = 0u64;

        let mut open = BinaryHeap::new();
        g_score[start_idx] = 0;
        insertion[start_idx] = Some(next_insertion);
        open.push(Reverse(OpenEntry {
            f_score: start.manhattan_distance(goal),
            inserted: next_insertion,
            cell: start_idx,
        }));
        next_insertion += 1;

        while let Some(Reverse(entry)) = open.pop() {
            let current_idx = entry.cell;
            if closed[current_idx] {
                continue;
            }

            if current_idx == goal_idx {
                return Some(Self::reconstruct_path(field, &came_from, current_idx));
            }
            closed[current_idx] = true;

            let current = field.point_at(current_idx);
            let tentative_g = g_score[current_idx] + 1;

            for direction in Direction::ALL {
                let neighbor = current.step(direction);
                let Some(neighbor_idx) = field.flat_index(neighbor) else {
                    continue;
                };
                if closed[neighbor_idx] || is_blocked(neighbor) {
                    continue;
                }
                if tentative_g >= g_score[neighbor_idx] {
                    continue;
                }

                came_from[neighbor_idx] = Some(current_idx);
                g_score[neighbor_idx] = tentative_g;

                let inserted = *insertion[neighbor_idx].get_or_insert_with(|| {
                    next_insertion += 1;
                    next_insertion - 1
                });
                open.push(Reverse(OpenEntry {
                    f_score: tentative_g + neighbor.manhattan_distance(goal),
                    inserted,
                    cell: neighbor_idx,
                }));
            }
        }

        None
    }

    fn reconstruct_path(field: FieldSize, came_from: &[Option<usize>], goal_idx: usize) -> Vec<Point> {
        let mut path = vec![field.point_at(goal_idx)];
        let mut current = goal_idx;
        while let Some(previous) = came_from[current] {
            path.push(field.point_at(previous));
            current = previous;
        }
        path.reverse();
        path
    }

    /// Direction of the first step along `path`, if it has one.
    pub fn first_step(path: &[Point]) -> Option<Direction> {
        match path {
            [from, to, ..] => Direction::between(*from, *to),
            _ => None,
        }
    }
}
