//! Attack and spell reach.
//!
//! Unlike movement, reach expands over every in-bounds cell: walls and units
//! do not stop the search, only the range bound and the optional sight check
//! do.

use std::collections::{HashSet, VecDeque};

use super::los::has_line_of_sight;
use crate::state::{GridModel, Position, UnitId};

/// Every in-bounds cell within `range` steps of `origin`, origin included, in
/// BFS order.
pub fn cells_in_range(grid: &GridModel, origin: Position, range: u32) -> Vec<Position> {
    if !grid.is_valid(origin) {
        return Vec::new();
    }

    let mut visited = HashSet::from([origin]);
    let mut ordered = vec![origin];
    let mut frontier = VecDeque::from([(origin, 0u32)]);

    while let Some((position, distance)) = frontier.pop_front() {
        if distance >= range {
            continue;
        }
        for neighbor in grid.neighbors4(position) {
            if visited.insert(neighbor.position) {
                ordered.push(neighbor.position);
                frontier.push_back((neighbor.position, distance + 1));
            }
        }
    }

    ordered
}

/// Cells a spell or attack may be aimed at: in range and, when required, in
/// sight of `origin`.
pub fn target_cells(
    grid: &GridModel,
    origin: Position,
    range: u32,
    requires_los: bool,
) -> Vec<Position> {
    cells_in_range(grid, origin, range)
        .into_iter()
        .filter(|cell| !requires_los || has_line_of_sight(grid, origin, *cell))
        .collect()
}

/// Occupied cells in reach whose occupant passes `accept`.
///
/// `accept` decides team and liveness; the grid only knows ids.
pub fn find_unit_targets(
    grid: &GridModel,
    origin: Position,
    range: u32,
    requires_los: bool,
    mut accept: impl FnMut(UnitId) -> bool,
) -> Vec<(UnitId, Position)> {
    cells_in_range(grid, origin, range)
        .into_iter()
        .filter_map(|cell| grid.occupant_at(cell).map(|unit| (unit, cell)))
        .filter(|(unit, _)| accept(*unit))
        .filter(|(_, cell)| !requires_los || has_line_of_sight(grid, origin, *cell))
        .collect()
}
