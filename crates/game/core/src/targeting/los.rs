//! Supercover line of sight.
//!
//! The walk steps one cell at a time, choosing the axis whose next grid line
//! the segment crosses first. When both lines are crossed at the same moment
//! (the segment passes exactly through a lattice corner) both side cells are
//! visited before stepping diagonally. Crossing times depend only on the
//! segment, not on the walk direction, so the visited set from `a` to `b`
//! equals the set from `b` to `a`.

use crate::state::{GridModel, Position};

/// Every cell touched by the segment between the two cell centers, endpoints
/// included, in walk order.
pub fn supercover_line(from: Position, to: Position) -> Vec<Position> {
    let nx = from.x.abs_diff(to.x) as i64;
    let ny = from.y.abs_diff(to.y) as i64;
    let sx = (to.x - from.x).signum();
    let sy = (to.y - from.y).signum();

    let mut cells = Vec::with_capacity((nx + ny + 1) as usize);
    let mut current = from;
    cells.push(current);

    let (mut ix, mut iy) = (0i64, 0i64);
    while ix < nx || iy < ny {
        // Compares (0.5 + ix) / nx against (0.5 + iy) / ny without division.
        let decision = (1 + 2 * ix) * ny - (1 + 2 * iy) * nx;
        if decision == 0 {
            cells.push(current.offset(sx, 0));
            cells.push(current.offset(0, sy));
            current = current.offset(sx, sy);
            ix += 1;
            iy += 1;
        } else if decision < 0 {
            current = current.offset(sx, 0);
            ix += 1;
        } else {
            current = current.offset(0, sy);
            iy += 1;
        }
        cells.push(current);
    }

    cells
}

/// True when every cell strictly between `from` and `to` is in bounds and
/// walkable. Units never block sight.
pub fn has_line_of_sight(grid: &GridModel, from: Position, to: Position) -> bool {
    supercover_line(from, to)
        .into_iter()
        .filter(|cell| *cell != from && *cell != to)
        .all(|cell| grid.is_walkable(cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TerrainKind;

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn straight_line_visits_each_cell_once() {
        let line = supercover_line(pos(0, 0), pos(0, 3));
        assert_eq!(line, vec![pos(0, 0), pos(0, 1), pos(0, 2), pos(0, 3)]);
    }

    #[test]
    fn exact_diagonal_visits_both_corner_cells() {
        let line = supercover_line(pos(0, 0), pos(2, 2));
        assert_eq!(
            line,
            vec![
                pos(0, 0),
                pos(1, 0),
                pos(0, 1),
                pos(1, 1),
                pos(2, 1),
                pos(1, 2),
                pos(2, 2),
            ]
        );
    }

    #[test]
    fn wall_between_endpoints_blocks() {
        let mut grid = GridModel::new(5, 5);
        grid.set_terrain(pos(0, 1), TerrainKind::Wall).unwrap();

        assert!(!has_line_of_sight(&grid, pos(0, 0), pos(0, 3)));
        assert!(has_line_of_sight(&grid, pos(1, 0), pos(1, 3)));
    }

    #[test]
    fn endpoints_never_block() {
        let mut grid = GridModel::new(3, 1);
        grid.set_terrain(pos(0, 0), TerrainKind::Wall).unwrap();
        grid.set_terrain(pos(2, 0), TerrainKind::Wall).unwrap();

        assert!(has_line_of_sight(&grid, pos(0, 0), pos(2, 0)));
        assert!(has_line_of_sight(&grid, pos(1, 0), pos(1, 0)));
    }

    #[test]
    fn corner_crossing_is_blocked_by_either_side() {
        let mut grid = GridModel::new(3, 3);
        grid.set_terrain(pos(0, 1), TerrainKind::Wall).unwrap();
        assert!(!has_line_of_sight(&grid, pos(0, 0), pos(1, 1)));
    }

    #[test]
    fn sight_is_symmetric_on_cluttered_board() {
        let grid = GridModel::from_ascii(&[
            "..#....",
            ".~...#.",
            "...#...",
            "#......",
            "..~..#.",
            "......#",
        ])
        .expect("valid layout");

        for a in grid.cells().map(|cell| cell.position) {
            for b in grid.cells().map(|cell| cell.position) {
                assert_eq!(
                    has_line_of_sight(&grid, a, b),
                    has_line_of_sight(&grid, b, a),
                    "asymmetric sight between {a} and {b}"
                );
            }
        }
    }
}
