//! Grid of cells with row-major indexing and four-neighbor adjacency
//!
//! Positions use `x` for columns and `y` for rows, with north pointing
//! towards increasing `y`. The backing array is an `ndarray::Array2` in
//! standard layout, so a cell's linear index is `y * width + x`.

use crate::algorithm::bitset::PossibilitySet;
use crate::spatial::cell::Cell;
use ndarray::Array2;
use std::fmt;

/// Cell coordinate within a grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl Position {
    /// Create a position
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid-adjacent direction, in the same clockwise order as tile edges
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards increasing `y`
    North,
    /// Towards increasing `x`
    East,
    /// Towards decreasing `y`
    South,
    /// Towards decreasing `x`
    West,
}

impl Direction {
    /// All directions, clockwise from north
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Edge slot this direction corresponds to
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Direction facing back
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Direction in which `to` lies from `from`, if they are adjacent
    pub const fn between(from: Position, to: Position) -> Option<Self> {
        if from.x == to.x && to.y == from.y + 1 {
            Some(Self::North)
        } else if from.y == to.y && to.x == from.x + 1 {
            Some(Self::East)
        } else if from.x == to.x && from.y == to.y + 1 {
            Some(Self::South)
        } else if from.y == to.y && from.x == to.x + 1 {
            Some(Self::West)
        } else {
            None
        }
    }
}

/// Row-major array of cells created once per run
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array2<Cell>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid whose cells all start with the same possibility set
    pub fn new(width: usize, height: usize, initial: &PossibilitySet) -> Self {
        let cells = Array2::from_shape_fn((height, width), |(y, x)| {
            Cell::new(Position::new(x, y), y * width + x, initial.clone())
        });
        Self {
            cells,
            width,
            height,
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether the grid has no cells
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a position lies in the grid
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Linear index of a position
    pub const fn index_of(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.y * self.width + position.x)
        } else {
            None
        }
    }

    /// Position of a linear index
    pub const fn position_of(&self, index: usize) -> Option<Position> {
        if index < self.len() {
            Some(Position::new(index % self.width, index / self.width))
        } else {
            None
        }
    }

    /// Cell at a position
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get((position.y, position.x))
    }

    /// Mutable cell at a position
    pub fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.cells.get_mut((position.y, position.x))
    }

    /// Cell at a linear index
    pub fn cell_at(&self, index: usize) -> Option<&Cell> {
        self.position_of(index).and_then(|p| self.cell(p))
    }

    /// Mutable cell at a linear index
    pub fn cell_at_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.position_of(index).and_then(|p| self.cell_mut(p))
    }

    /// Adjacent position in a direction, if it lies in the grid
    pub const fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        let candidate = match direction {
            Direction::North => Position::new(position.x, position.y + 1),
            Direction::East => Position::new(position.x + 1, position.y),
            Direction::South => {
                if position.y == 0 {
                    return None;
                }
                Position::new(position.x, position.y - 1)
            }
            Direction::West => {
                if position.x == 0 {
                    return None;
                }
                Position::new(position.x - 1, position.y)
            }
        };
        if self.contains(candidate) {
            Some(candidate)
        } else {
            None
        }
    }

    /// Up to four adjacent positions with their directions, clockwise from north
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(position, d).map(|p| (d, p)))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Number of cells holding exactly one possibility
    pub fn resolved_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_resolved()).count()
    }

    /// Whether every cell holds exactly one possibility
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_resolved)
    }
}
