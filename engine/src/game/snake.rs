use std::collections::{HashSet, VecDeque};

use crate::types::{Direction, Point};

#[derive(Clone, Debug)]
pub struct Snake {
    pub body: VecDeque<Point>,
    pub body_set: HashSet<Point>,
    pub direction: Direction,
}

impl Snake {
    /// Three segments: the head at `start_pos` and two trailing against `direction`.
    pub fn new(start_pos: Point, direction: Direction) -> Self {
        let behind = direction.opposite();
        let segment2 = start_pos.step(behind);
        let segment3 = segment2.step(behind);
        Self::from_body([start_pos, segment2, segment3], direction)
    }

    /// Head first. Segments are expected to be distinct and 4-adjacent.
    pub fn from_body<I>(segments: I, direction: Direction) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let body: VecDeque<Point> = segments.into_iter().collect();
        let body_set = body.iter().copied().collect();
        Self {
            body,
            body_set,
            direction,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.body_set.contains(&point)
    }

    /// Pushes the new head and drops the tail unless the snake grows this tick.
    pub fn advance(&mut self, next_head: Point, grow: bool) {
        if !grow {
            let tail = self
                .body
                .pop_back()
                .expect("Snake body should never be empty");
            self.body_set.remove(&tail);
        }
        self.body.push_front(next_head);
        self.body_set.insert(next_head);
    }
}
