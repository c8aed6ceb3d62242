//! Authoritative battle grid.
//!
//! The grid owns walkability and occupancy for every cell. Occupancy is the
//! only piece of grid state that changes during a battle; terrain is fixed
//! once the battle is built.

use arrayvec::ArrayVec;
use tracing::error;

use crate::error::{ErrorSeverity, GameError};

use super::{Position, UnitId};

/// Hazard variants recognised by layouts.
///
/// Hazards are reserved tags: they are walkable and carry no gameplay
/// behavior of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HazardKind {
    Pit,
    Spikes,
    Lava,
}

/// Terrain tag attached to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
    Water,
    Hazard(HazardKind),
    Custom(u16),
}

impl TerrainKind {
    /// Default walkability for freshly created cells of this terrain.
    pub const fn is_walkable(self) -> bool {
        !matches!(self, TerrainKind::Wall | TerrainKind::Water)
    }

    fn from_glyph(glyph: char) -> Option<Self> {
        let terrain = match glyph {
            '.' => TerrainKind::Floor,
            '#' => TerrainKind::Wall,
            '~' => TerrainKind::Water,
            'o' => TerrainKind::Hazard(HazardKind::Pit),
            '^' => TerrainKind::Hazard(HazardKind::Spikes),
            '%' => TerrainKind::Hazard(HazardKind::Lava),
            _ => return None,
        };
        Some(terrain)
    }
}

/// A single cell of the battle grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub position: Position,
    pub walkable: bool,
    pub terrain: TerrainKind,
    pub occupant: Option<UnitId>,
}

impl GridCell {
    fn new(position: Position, terrain: TerrainKind) -> Self {
        Self {
            position,
            walkable: terrain.is_walkable(),
            terrain,
            occupant: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Walkable and unoccupied.
    pub fn is_free(&self) -> bool {
        self.walkable && self.occupant.is_none()
    }
}

/// Reasons a unit could not be placed on a cell.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementError {
    #[error("{position} is outside the grid")]
    OutOfBounds { position: Position },

    #[error("{position} is not walkable")]
    NotWalkable { position: Position },

    #[error("{position} is already occupied by {occupant}")]
    Occupied {
        position: Position,
        occupant: UnitId,
    },
}

impl GameError for PlacementError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "PLACEMENT_OUT_OF_BOUNDS",
            Self::NotWalkable { .. } => "PLACEMENT_NOT_WALKABLE",
            Self::Occupied { .. } => "PLACEMENT_OCCUPIED",
        }
    }
}

/// Errors raised while parsing a textual grid layout.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has width {width}, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("unknown terrain glyph {glyph:?} at {position}")]
    UnknownGlyph { glyph: char, position: Position },
}

/// Rectangular cell grid with single-occupant tracking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridModel {
    width: u32,
    height: u32,
    cells: Vec<GridCell>,
}

impl GridModel {
    /// Creates an open grid where every cell is walkable floor.
    pub fn new(width: u32, height: u32) -> Self {
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                cells.push(GridCell::new(Position::new(x, y), TerrainKind::Floor));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Builds a grid from rows of terrain glyphs.
    ///
    /// `.` floor, `#` wall, `~` water, `o` pit, `^` spikes, `%` lava.
    pub fn from_ascii(rows: &[&str]) -> Result<Self, LayoutError> {
        let expected = rows.first().ok_or(LayoutError::Empty)?.chars().count();
        if expected == 0 {
            return Err(LayoutError::Empty);
        }

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != expected {
                return Err(LayoutError::RaggedRow {
                    row,
                    width,
                    expected,
                });
            }
            for (column, glyph) in line.chars().enumerate() {
                let position = Position::new(column as i32, row as i32);
                let terrain = TerrainKind::from_glyph(glyph)
                    .ok_or(LayoutError::UnknownGlyph { glyph, position })?;
                cells.push(GridCell::new(position, terrain));
            }
        }

        Ok(Self {
            width: expected as u32,
            height: rows.len() as u32,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bounds check only.
    pub fn is_valid(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.is_valid(position)
            .then(|| (position.y as u32 * self.width + position.x as u32) as usize)
    }

    pub fn cell_at(&self, position: Position) -> Option<&GridCell> {
        self.index(position).map(|index| &self.cells[index])
    }

    fn cell_at_mut(&mut self, position: Position) -> Option<&mut GridCell> {
        self.index(position).map(move |index| &mut self.cells[index])
    }

    pub fn is_walkable(&self, position: Position) -> bool {
        self.cell_at(position).is_some_and(|cell| cell.walkable)
    }

    pub fn is_free(&self, position: Position) -> bool {
        self.cell_at(position).is_some_and(GridCell::is_free)
    }

    pub fn occupant_at(&self, position: Position) -> Option<UnitId> {
        self.cell_at(position).and_then(|cell| cell.occupant)
    }

    /// Orthogonal in-bounds neighbors, always in north, east, south, west order.
    pub fn neighbors4(&self, position: Position) -> ArrayVec<&GridCell, 4> {
        const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

        DIRECTIONS
            .iter()
            .filter_map(|&(dx, dy)| self.cell_at(position.offset(dx, dy)))
            .collect()
    }

    /// Claims a cell for `unit`. Fails without mutation if the cell is out of
    /// bounds, not walkable, or held by another unit. Re-claiming a cell the
    /// unit already holds is a no-op.
    pub fn set_occupant(&mut self, position: Position, unit: UnitId) -> Result<(), PlacementError> {
        let cell = self
            .cell_at_mut(position)
            .ok_or(PlacementError::OutOfBounds { position })?;

        if !cell.walkable {
            return Err(PlacementError::NotWalkable { position });
        }
        match cell.occupant {
            Some(occupant) if occupant != unit => {
                Err(PlacementError::Occupied { position, occupant })
            }
            _ => {
                cell.occupant = Some(unit);
                Ok(())
            }
        }
    }

    /// Releases a cell, returning its previous occupant.
    pub fn clear_occupant(&mut self, position: Position) -> Option<UnitId> {
        self.cell_at_mut(position).and_then(|cell| cell.occupant.take())
    }

    /// Moves `unit` one hop from `from` to `to`: the source cell is released
    /// first, then the destination is claimed. On failure the source claim is
    /// restored.
    pub fn relocate(
        &mut self,
        unit: UnitId,
        from: Position,
        to: Position,
    ) -> Result<(), PlacementError> {
        let previous = self.clear_occupant(from);
        if let Err(error) = self.set_occupant(to, unit) {
            if let Some(cell) = self.cell_at_mut(from) {
                cell.occupant = previous;
            }
            return Err(error);
        }
        Ok(())
    }

    /// Steps `unit` from `from` along `path`, releasing each cell as it
    /// claims the next. A blocked step sends the unit straight back to `from`
    /// and reports the block.
    pub fn walk(&mut self, unit: UnitId, from: Position, path: &[Position]) -> Result<(), PlacementError> {
        let mut current = from;
        for &next in path {
            if let Err(blocked) = self.relocate(unit, current, next) {
                if let Err(rewind) = self.relocate(unit, current, from) {
                    error!(%unit, %current, %from, %rewind, "partial walk could not be rewound");
                    return Err(rewind);
                }
                return Err(blocked);
            }
            current = next;
        }
        Ok(())
    }

    /// Replaces a cell's terrain, resetting its walkability to the terrain default.
    ///
    /// Refuses to make an occupied cell unwalkable.
    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> Result<(), PlacementError> {
        let cell = self.editable_cell(position, terrain.is_walkable())?;
        cell.terrain = terrain;
        cell.walkable = terrain.is_walkable();
        Ok(())
    }

    /// Overrides walkability independently of terrain.
    ///
    /// Refuses to make an occupied cell unwalkable.
    pub fn set_walkable(&mut self, position: Position, walkable: bool) -> Result<(), PlacementError> {
        self.editable_cell(position, walkable)?.walkable = walkable;
        Ok(())
    }

    fn editable_cell(&mut self, position: Position, walkable: bool) -> Result<&mut GridCell, PlacementError> {
        let cell = self
            .cell_at_mut(position)
            .ok_or(PlacementError::OutOfBounds { position })?;
        match (cell.occupant, walkable) {
            (Some(occupant), false) => Err(PlacementError::Occupied { position, occupant }),
            _ => Ok(cell),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }
}
