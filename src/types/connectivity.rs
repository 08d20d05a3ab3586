use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SegmentError;
use crate::types::Point;

/// Compass directions in the order the builder visits them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];
    const ORTHOGONAL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// (row, col) offset.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::N => (-1, 0),
            Direction::NE => (-1, 1),
            Direction::E => (0, 1),
            Direction::SE => (1, 1),
            Direction::S => (1, 0),
            Direction::SW => (1, -1),
            Direction::W => (0, -1),
            Direction::NW => (-1, -1),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    #[default]
    Four,
    Eight,
}

impl Connectivity {
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Connectivity::Four => &Direction::ORTHOGONAL,
            Connectivity::Eight => &Direction::ALL,
        }
    }

    /// Neighbours of `point` inside a `rows`x`cols` grid, in direction order.
    pub fn neighbours(self, point: Point, rows: usize, cols: usize) -> impl Iterator<Item = Point> {
        self.directions()
            .iter()
            .filter_map(move |direction| neighbour(point, *direction, rows, cols))
    }
}

/// The pixel next to `point` in `direction`, or `None` past the grid boundary.
pub fn neighbour(point: Point, direction: Direction, rows: usize, cols: usize) -> Option<Point> {
    let (dr, dc) = direction.offset();
    let row = point.row.checked_add_signed(dr)?;
    let col = point.col.checked_add_signed(dc)?;
    if row < rows && col < cols {
        Some(Point::new(row, col))
    } else {
        None
    }
}

impl FromStr for Connectivity {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "4" | "four" => Ok(Connectivity::Four),
            "8" | "eight" => Ok(Connectivity::Eight),
            other => Err(SegmentError::InvalidConnectivity(other.to_string())),
        }
    }
}

impl Display for Connectivity {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Connectivity::Four => write!(f, "4-connectivity"),
            Connectivity::Eight => write!(f, "8-connectivity"),
        }
    }
}
