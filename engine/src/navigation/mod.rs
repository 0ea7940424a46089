mod cycle;
mod cycle_safe;
mod grid;
mod navigator;
mod path_planner;
mod reactive;

pub use cycle::{CycleIndex, HamiltonianCycle};
pub use cycle_safe::{CycleSafeController, NavigationMode};
pub use grid::{GridModel, NavigationState};
pub use navigator::{NavigationController, Navigator, NavigatorType};
pub use path_planner::PathPlanner;
pub use reactive::ReactiveController;

use crate::types::{FieldSize, Point};

/// Builds the Hamiltonian cycle for a field along with its position index.
/// Must be called again whenever the field size changes.
pub fn build_cycle(field_size: FieldSize) -> (Vec<Point>, CycleIndex) {
    let cycle = HamiltonianCycle::build(field_size);
    (cycle.cells().to_vec(), cycle.index().clone())
}
