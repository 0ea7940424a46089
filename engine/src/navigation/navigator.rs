use serde::{Deserialize, Serialize};

use crate::types::{Direction, FieldSize};
use super::cycle_safe::CycleSafeController;
use super::grid::NavigationState;
use super::reactive::ReactiveController;

/// A steering policy consulted exactly once per tick.
///
/// The returned direction may be a reversal of `current_direction`; the caller
/// rejects reversals and keeps the current heading instead.
pub trait NavigationController {
    fn determine_next_move(&self, state: &NavigationState) -> Direction;

    /// Called on every game reset and whenever the field size changes, before
    /// the next `determine_next_move`.
    fn reset(&mut self, field_size: FieldSize);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigatorType {
    Reactive,
    #[default]
    CycleSafe,
}

impl NavigatorType {
    pub fn name(&self) -> &'static str {
        match self {
            NavigatorType::Reactive => "reactive",
            NavigatorType::CycleSafe => "cycle_safe",
        }
    }
}

pub enum Navigator {
    Reactive(ReactiveController),
    CycleSafe(CycleSafeController),
}

impl Navigator {
    pub fn new(navigator_type: NavigatorType, field_size: FieldSize) -> Self {
        match navigator_type {
            NavigatorType::Reactive => Navigator::Reactive(ReactiveController::new()),
            NavigatorType::CycleSafe => Navigator::CycleSafe(CycleSafeController::new(field_size)),
        }
    }

    pub fn navigator_type(&self) -> NavigatorType {
        match self {
            Navigator::Reactive(_) => NavigatorType::Reactive,
            Navigator::CycleSafe(_) => NavigatorType::CycleSafe,
        }
    }
}

impl NavigationController for Navigator {
    fn determine_next_move(&self, state: &NavigationState) -> Direction {
        match self {
            Navigator::Reactive(controller) => controller.determine_next_move(state),
            Navigator::CycleSafe(controller) => controller.determine_next_move(state),
        }
    }

    fn reset(&mut self, field_size: FieldSize) {
        match self {
            Navigator::Reactive(controller) => controller.reset(field_size),
            Navigator::CycleSafe(controller) => controller.reset(field_size),
        }
    }
}
