//! Bounded BFS over free cells.

use std::collections::{HashMap, VecDeque};

use crate::state::{GridModel, Position};

/// One cell reached by the movement search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachableCell {
    pub position: Position,
    /// Steps from the origin.
    pub cost: u32,
    parent: Option<usize>,
}

/// Cells a unit can reach with its remaining movement points.
///
/// Cells are stored in BFS visit order (origin first), so iteration is
/// deterministic and ordered by cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovementRange {
    origin: Position,
    cells: Vec<ReachableCell>,
    index: HashMap<Position, usize>,
}

impl MovementRange {
    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn contains(&self, position: Position) -> bool {
        self.index.contains_key(&position)
    }

    /// Step cost to reach `position`, if reachable.
    pub fn cost_to(&self, position: Position) -> Option<u32> {
        self.index.get(&position).map(|&i| self.cells[i].cost)
    }

    pub fn cells(&self) -> &[ReachableCell] {
        &self.cells
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().map(|cell| cell.position)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Shortest 4-directional path to `destination`, excluding the origin and
    /// ending at the destination. `Some(vec![])` when the destination is the
    /// origin.
    pub fn path_to(&self, destination: Position) -> Option<Vec<Position>> {
        let mut cursor = *self.index.get(&destination)?;
        let mut path = Vec::with_capacity(self.cells[cursor].cost as usize);

        while let Some(parent) = self.cells[cursor].parent {
            path.push(self.cells[cursor].position);
            cursor = parent;
        }
        path.reverse();
        Some(path)
    }
}

/// Breadth-first search from `origin`, bounded by `movement_points` steps.
///
/// A cell is entered only when it is walkable and unoccupied. The origin is
/// always part of the result, even with zero movement points. Neighbors are
/// expanded north, east, south, west, which fixes which shortest path
/// [`MovementRange::path_to`] reports.
pub fn movement_range(grid: &GridModel, origin: Position, movement_points: u32) -> MovementRange {
    let mut range = MovementRange {
        origin,
        cells: vec![ReachableCell {
            position: origin,
            cost: 0,
            parent: None,
        }],
        index: HashMap::from([(origin, 0)]),
    };

    let mut frontier = VecDeque::from([0usize]);
    while let Some(current) = frontier.pop_front() {
        let ReachableCell { position, cost, .. } = range.cells[current];
        if cost >= movement_points {
            continue;
        }

        for neighbor in grid.neighbors4(position) {
            if !neighbor.is_free() || range.index.contains_key(&neighbor.position) {
                continue;
            }
            let next = range.cells.len();
            range.cells.push(ReachableCell {
                position: neighbor.position,
                cost: cost + 1,
                parent: Some(current),
            });
            range.index.insert(neighbor.position, next);
            frontier.push_back(next);
        }
    }

    range
}

/// Shortest path from `origin` to `destination` within `movement_points`.
pub fn shortest_path(
    grid: &GridModel,
    origin: Position,
    destination: Position,
    movement_points: u32,
) -> Option<Vec<Position>> {
    movement_range(grid, origin, movement_points).path_to(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{TerrainKind, UnitId};

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn open_board_range_is_manhattan_diamond() {
        let mut grid = GridModel::new(5, 5);
        grid.set_occupant(pos(2, 2), UnitId(1)).unwrap();

        let range = movement_range(&grid, pos(2, 2), 2);

        let expected: Vec<Position> = grid
            .cells()
            .map(|cell| cell.position)
            .filter(|p| p.manhattan(pos(2, 2)) <= 2)
            .collect();
        assert_eq!(range.len(), expected.len());
        assert_eq!(range.len(), 13);
        assert!(expected.iter().all(|p| range.contains(*p)));
    }

    #[test]
    fn blocked_cells_are_excluded_and_detoured() {
        let mut grid = GridModel::new(5, 5);
        grid.set_occupant(pos(2, 2), UnitId(1)).unwrap();
        grid.set_terrain(pos(2, 1), TerrainKind::Wall).unwrap();
        grid.set_occupant(pos(3, 2), UnitId(2)).unwrap();

        let range = movement_range(&grid, pos(2, 2), 2);

        assert!(!range.contains(pos(2, 1)));
        assert!(!range.contains(pos(3, 2)));
        // (2,0) sits behind the wall and needs 4 steps.
        assert!(!range.contains(pos(2, 0)));
        // (4,2) sits behind the ally and needs 4 steps.
        assert!(!range.contains(pos(4, 2)));
        for cell in range.cells() {
            if cell.position != pos(2, 2) {
                assert!(grid.is_free(cell.position));
            }
        }
    }

    #[test]
    fn zero_movement_keeps_start_cell() {
        let mut grid = GridModel::new(3, 3);
        grid.set_occupant(pos(1, 1), UnitId(1)).unwrap();

        let range = movement_range(&grid, pos(1, 1), 0);
        assert_eq!(range.positions().collect::<Vec<_>>(), vec![pos(1, 1)]);
        assert_eq!(range.path_to(pos(1, 1)), Some(vec![]));
    }

    #[test]
    fn path_prefers_north_then_east() {
        let grid = GridModel::new(3, 3);
        let path = shortest_path(&grid, pos(0, 2), pos(1, 1), 2);
        // North is expanded before east, so the path goes up first.
        assert_eq!(path, Some(vec![pos(0, 1), pos(1, 1)]));
        assert_eq!(shortest_path(&grid, pos(0, 2), pos(2, 0), 3), None);
    }
}
