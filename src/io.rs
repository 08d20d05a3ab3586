//! Readers and writers around the engine: images, intensity CSV and JSON
//! reports.
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma};
use serde::Serialize;

use crate::error::{Result, SegmentError};
use crate::types::{Grid, IntensityGrid, Mask, MAX_INTENSITY};

/// Loads any image format the `image` crate decodes and converts it to 8-bit
/// luma.
pub fn load_grayscale_image(path: &Path) -> Result<IntensityGrid> {
    let img = image::open(path)?.into_luma8();
    let cols = img.width() as usize;
    let rows = img.height() as usize;
    Grid::new(rows, cols, img.into_raw())
}

pub fn save_grayscale_image(grid: &IntensityGrid, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let image: GrayImage =
        ImageBuffer::from_raw(grid.cols() as u32, grid.rows() as u32, grid.cells().to_vec())
            .ok_or_else(|| {
                SegmentError::InvalidDimensions(format!(
                    "{}x{} grid does not fit an image buffer",
                    grid.rows(),
                    grid.cols()
                ))
            })?;
    image.save(path)?;
    Ok(())
}

/// Black image with the cut-boundary pixels set to white.
pub fn write_boundary_image(boundary: &Mask, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(boundary.cols() as u32, boundary.rows() as u32);
    for (index, on_cut) in boundary.cells().iter().enumerate() {
        if *on_cut {
            let point = boundary.point_of(index);
            out.put_pixel(point.col as u32, point.row as u32, Luma([MAX_INTENSITY]));
        }
    }
    out.save(path)?;
    Ok(())
}

/// One grid row per line, comma-separated intensities. Blank lines are
/// skipped.
pub fn read_grid_csv(path: &Path) -> Result<IntensityGrid> {
    let f = BufReader::new(File::open(path)?);
    let mut cells = Vec::new();
    let mut rows = 0;
    let mut cols = None;
    for (i, line) in f.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = parse_csv_row(&line).map_err(|message| SegmentError::Csv {
            line: i + 1,
            message,
        })?;
        match cols {
            None => cols = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(SegmentError::Csv {
                    line: i + 1,
                    message: format!("Expected {expected} values, but got {}", row.len()),
                })
            }
            Some(_) => {}
        }
        cells.extend(row);
        rows += 1;
    }
    Grid::new(rows, cols.unwrap_or(0), cells)
}

pub fn write_grid_csv(grid: &IntensityGrid, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = BufWriter::new(File::create(path)?);
    for row in grid.cells().chunks(grid.cols()) {
        let line = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<String>>()
            .join(",");
        writeln!(file, "{line}")?;
    }
    file.flush()?;
    Ok(())
}

/// Serializes a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn parse_csv_row(line: &str) -> std::result::Result<Vec<u8>, String> {
    line.split(',')
        .map(|value| {
            let value = value.trim();
            value
                .parse::<u8>()
                .map_err(|_| format!("Expected an intensity in [0, 255], but got \"{value}\""))
        })
        .collect()
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
