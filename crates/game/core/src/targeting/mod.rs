//! Movement range, attack/spell reach, and line of sight.
//!
//! All searches are pure functions of the grid; the engine supplies unit
//! filters and costs.

mod los;
mod movement;
mod range;

pub use los::{has_line_of_sight, supercover_line};
pub use movement::{MovementRange, ReachableCell, movement_range, shortest_path};
pub use range::{cells_in_range, find_unit_targets, target_cells};
