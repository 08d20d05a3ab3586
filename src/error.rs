use std::io;

use thiserror::Error;

use crate::types::Point;

#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Invalid grid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Terminal {point} lies outside the {rows}x{cols} grid")]
    TerminalOutOfBounds { point: Point, rows: usize, cols: usize },

    #[error("Source and sink coincide at {0}")]
    TerminalsCoincide(Point),

    #[error("Invalid point: {0}. Expected \"row,col\".")]
    InvalidPoint(String),

    #[error("Invalid connectivity: {0}. Expected 4 or 8.")]
    InvalidConnectivity(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Edge {from} -> {to} is missing from the residual graph")]
    MissingEdge { from: Point, to: Point },

    #[error("Capacity of edge {from} -> {to} would drop to {capacity}")]
    NegativeCapacity {
        from: Point,
        to: Point,
        capacity: f64,
    },

    #[error("Augmenting path is broken at node {0}")]
    BrokenPath(usize),

    #[error("Operation not allowed in engine state {0}")]
    InvalidState(String),

    #[error("Stopped after {0} augmentations before the graph was saturated")]
    AugmentationLimit(u64),

    #[error("Malformed grid text at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SegmentError>;
