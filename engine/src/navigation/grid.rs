use crate::types::{Direction, FieldSize, Point};

/// Read-only snapshot handed to a controller once per tick.
#[derive(Clone, Copy, Debug)]
pub struct NavigationState<'a> {
    /// Head first, tail last.
    pub snake: &'a [Point],
    pub food: Point,
    pub field_size: FieldSize,
    pub current_direction: Direction,
}

impl<'a> NavigationState<'a> {
    pub fn new(
        snake: &'a [Point],
        food: Point,
        field_size: FieldSize,
        current_direction: Direction,
    ) -> Self {
        Self {
            snake,
            food,
            field_size,
            current_direction,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Free,
    Body,
    Tail,
}

/// Occupancy of the field for one tick, stored as a flat `y * width + x` arena.
pub struct GridModel<'a> {
    state: NavigationState<'a>,
    cells: Vec<Cell>,
}

impl<'a> GridModel<'a> {
    pub fn new(state: &NavigationState<'a>) -> Self {
        let mut cells = vec![Cell::Free; state.field_size.cell_count()];
        let last = state.snake.len().saturating_sub(1);
        for (i, segment) in state.snake.iter().enumerate() {
            if let Some(idx) = state.field_size.flat_index(*segment) {
                // A body segment sharing the tail's cell keeps the cell blocked.
                if i == last && cells[idx] == Cell::Free {
                    cells[idx] = Cell::Tail;
                } else {
                    cells[idx] = Cell::Body;
                }
            }
        }
        Self { state: *state, cells }
    }

    pub fn field_size(&self) -> FieldSize {
        self.state.field_size
    }

    pub fn snake(&self) -> &'a [Point] {
        self.state.snake
    }

    pub fn snake_len(&self) -> usize {
        self.state.snake.len()
    }

    pub fn head(&self) -> Option<Point> {
        self.state.snake.first().copied()
    }

    pub fn tail(&self) -> Option<Point> {
        self.state.snake.last().copied()
    }

    pub fn food(&self) -> Point {
        self.state.food
    }

    pub fn current_direction(&self) -> Direction {
        self.state.current_direction
    }

    /// Snake length over total cell count.
    pub fn fill_ratio(&self) -> f64 {
        let cells = self.state.field_size.cell_count();
        if cells == 0 {
            return 1.0;
        }
        self.snake_len() as f64 / cells as f64
    }

    /// True outside the field or on any segment except the tail, which vacates
    /// before a collision registers. Food never sits on the tail, so a move that
    /// eats cannot land there.
    pub fn is_occupied(&self, pos: Point) -> bool {
        match self.state.field_size.flat_index(pos) {
            Some(idx) => self.cells[idx] == Cell::Body,
            None => true,
        }
    }

    /// Like [`GridModel::is_occupied`], but the tail counts as an obstacle too.
    /// This is the obstacle map handed to the path planner.
    pub fn is_blocked(&self, pos: Point) -> bool {
        match self.state.field_size.flat_index(pos) {
            Some(idx) => self.cells[idx] != Cell::Free,
            None => true,
        }
    }

    /// Directions from the head, in [`Direction::ALL`] order, whose target cell is not occupied.
    pub fn open_moves(&self) -> Vec<(Direction, Point)> {
        let Some(head) = self.head() else {
            return Vec::new();
        };
        Direction::ALL
            .into_iter()
            .map(|direction| (direction, head.step(direction)))
            .filter(|(_, pos)| !self.is_occupied(*pos))
            .collect()
    }
}
