use crate::types::{FieldSize, Point};

/// Position of every cell within the cycle, stored as a flat `y * width + x` arena.
#[derive(Clone, Debug)]
pub struct CycleIndex {
    field_size: FieldSize,
    slots: Vec<usize>,
}

impl CycleIndex {
    fn from_order(field_size: FieldSize, order: &[Point]) -> Self {
        let mut slots = vec![usize::MAX; field_size.cell_count()];
        for (position, cell) in order.iter().enumerate() {
            if let Some(idx) = field_size.flat_index(*cell) {
                slots[idx] = position;
            }
        }
        Self { field_size, slots }
    }

    pub fn index_of(&self, point: Point) -> Option<usize> {
        let idx = self.field_size.flat_index(point)?;
        match self.slots[idx] {
            usize::MAX => None,
            position => Some(position),
        }
    }
}

/// Closed tour over every cell of the field, built once per field size.
///
/// Columns are swept alternately top-to-bottom and bottom-to-top. Row 0 is kept
/// free beyond the first column and serves as the return lane back to the
/// origin, which closes the tour. When the width is odd but the height is even
/// the same sweep runs over rows instead. An odd-by-odd field has no
/// Hamiltonian cycle at all; the plain boustrophedon path is used and
/// [`HamiltonianCycle::is_closed`] reports `false`.
#[derive(Clone, Debug)]
pub struct HamiltonianCycle {
    field_size: FieldSize,
    order: Vec<Point>,
    index: CycleIndex,
}

impl HamiltonianCycle {
    pub fn build(field_size: FieldSize) -> Self {
        let (width, height) = (field_size.width, field_size.height);
        let order = if width % 2 == 0 {
            lane_sweep(width, height, |lane, along| Point::new(lane as i32, along as i32))
        } else if height % 2 == 0 {
            lane_sweep(height, width, |lane, along| Point::new(along as i32, lane as i32))
        } else {
            boustrophedon(width, height)
        };
        let index = CycleIndex::from_order(field_size, &order);
        Self {
            field_size,
            order,
            index,
        }
    }

    pub fn field_size(&self) -> FieldSize {
        self.field_size
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn cells(&self) -> &[Point] {
        &self.order
    }

    pub fn index(&self) -> &CycleIndex {
        &self.index
    }

    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.index.index_of(point)
    }

    pub fn cell_at(&self, position: usize) -> Point {
        self.order[position % self.order.len()]
    }

    /// Cell that follows `position` in cycle order, wrapping at the end.
    pub fn successor(&self, position: usize) -> Point {
        self.cell_at(position + 1)
    }

    /// Steps needed to walk forward along the cycle from `from` to `to`.
    pub fn forward_distance(&self, from: usize, to: usize) -> usize {
        let len = self.order.len();
        (to + len - from % len) % len
    }

    /// Whether the last cell is adjacent to the first.
    pub fn is_closed(&self) -> bool {
        match (self.order.first(), self.order.last()) {
            (Some(first), Some(last)) => self.order.len() > 1 && first.is_adjacent(*last),
            _ => false,
        }
    }
}

/// `lanes` must be even. Lane 0 is walked in full; every other lane skips
/// position 0, which is walked last as the way home.
fn lane_sweep<F>(lanes: usize, lane_len: usize, to_point: F) -> Vec<Point>
where
    F: Fn(usize, usize) -> Point,
{
    let mut order = Vec::with_capacity(lanes * lane_len);
    order.extend((0..lane_len).map(|along| to_point(0, along)));
    for lane in 1..lanes {
        if lane % 2 == 1 {
            order.extend((1..lane_len).rev().map(|along| to_point(lane, along)));
        } else {
            order.extend((1..lane_len).map(|along| to_point(lane, along)));
        }
    }
    order.extend((1..lanes).rev().map(|lane| to_point(lane, 0)));
    order
}

fn boustrophedon(width: usize, height: usize) -> Vec<Point> {
    let mut order = Vec::with_capacity(width * height);
    for x in 0..width {
        if x % 2 == 0 {
            order.extend((0..height).map(|y| Point::new(x as i32, y as i32)));
        } else {
            order.extend((0..height).rev().map(|y| Point::new(x as i32, y as i32)));
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_covers_field(cycle: &HamiltonianCycle) {
        let field = cycle.field_size();
        assert_eq!(cycle.len(), field.cell_count());
        let distinct: HashSet<Point> = cycle.cells().iter().copied().collect();
        assert_eq!(distinct.len(), field.cell_count());
        assert!(cycle.cells().iter().all(|p| field.contains(*p)));
        for pair in cycle.cells().windows(2) {
            assert!(pair[0].is_adjacent(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_cycle_is_valid_when_a_side_is_even() {
        for width in 2..=9 {
            for height in 2..=9 {
                if width % 2 == 1 && height % 2 == 1 {
                    continue;
                }
                let cycle = HamiltonianCycle::build(FieldSize::new(width, height));
                assert_covers_field(&cycle);
                assert!(cycle.is_closed(), "{}x{} does not wrap", width, height);
            }
        }
    }

    #[test]
    fn test_default_board_cycle() {
        let cycle = HamiltonianCycle::build(FieldSize::new(30, 20));
        assert_covers_field(&cycle);
        assert!(cycle.is_closed());
        assert_eq!(cycle.cell_at(0), Point::new(0, 0));
        assert_eq!(cycle.cell_at(1), Point::new(0, 1));
    }

    #[test]
    fn test_odd_by_odd_falls_back_to_open_path() {
        let cycle = HamiltonianCycle::build(FieldSize::new(5, 3));
        assert_covers_field(&cycle);
        assert!(!cycle.is_closed());
    }

    #[test]
    fn test_index_is_inverse_of_order() {
        let field = FieldSize::new(6, 4);
        let cycle = HamiltonianCycle::build(field);
        for (position, cell) in cycle.cells().iter().enumerate() {
            assert_eq!(cycle.index_of(*cell), Some(position));
        }
        assert_eq!(cycle.index_of(Point::new(6, 0)), None);
        assert_eq!(cycle.index_of(Point::new(-1, 2)), None);
    }

    #[test]
    fn test_successor_and_forward_distance_wrap() {
        let cycle = HamiltonianCycle::build(FieldSize::new(4, 4));
        let last = cycle.len() - 1;
        assert_eq!(cycle.successor(last), cycle.cell_at(0));
        assert_eq!(cycle.forward_distance(last, 0), 1);
        assert_eq!(cycle.forward_distance(3, 3), 0);
        assert_eq!(cycle.forward_distance(5, 2), cycle.len() - 3);
    }
}
