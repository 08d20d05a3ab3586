use serde::Serialize;

use crate::types::{Capacity, Point};

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize)]
pub struct Edge {
    pub from: Point,
    pub to: Point,
    pub capacity: Capacity,
}
