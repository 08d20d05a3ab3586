use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SegmentError;

/// A pixel coordinate. The grid itself is the node index space, so a point is
/// all the identity a node has.
#[derive(
    Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Point {
        Point { row, col }
    }
}

fn coordinates() -> &'static Regex {
    static COORDINATES: OnceLock<Regex> = OnceLock::new();
    COORDINATES.get_or_init(|| Regex::new(r"^\s*(\d+)\s*,\s*(\d+)\s*$").unwrap())
}

impl FromStr for Point {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = coordinates()
            .captures(s)
            .ok_or_else(|| SegmentError::InvalidPoint(s.to_string()))?;
        let row = captures[1]
            .parse()
            .map_err(|_| SegmentError::InvalidPoint(s.to_string()))?;
        let col = captures[2]
            .parse()
            .map_err(|_| SegmentError::InvalidPoint(s.to_string()))?;
        Ok(Point { row, col })
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod test {
    use super::Point;

    #[test]
    fn to_string() {
        assert_eq!(format!("{}", Point::new(3, 14)), "(3, 14)");
    }

    #[test]
    fn parse() {
        assert_eq!("0,2".parse::<Point>().unwrap(), Point::new(0, 2));
        assert_eq!(" 12 , 7 ".parse::<Point>().unwrap(), Point::new(12, 7));
        assert!("12".parse::<Point>().is_err());
        assert!("-1,3".parse::<Point>().is_err());
        assert!("1,2,3".parse::<Point>().is_err());
        assert!("99999999999999999999999,1".parse::<Point>().is_err());
    }

    #[test]
    fn parse_reuses_pattern() {
        for (row, col) in [(0, 0), (4, 9), (1024, 3)] {
            let text = format!("{row},{col}");
            assert_eq!(text.parse::<Point>().unwrap(), Point::new(row, col));
        }
        assert!(std::ptr::eq(super::coordinates(), super::coordinates()));
    }

    #[test]
    fn compare() {
        assert!(Point::new(0, 5) < Point::new(1, 0));
        assert!(Point::new(1, 1) > Point::new(1, 0));
    }
}
