//! Comma-delimited point tables.
//!
//! A table is a `x,y,z` header row followed by one row per point. Values use
//! Rust's shortest round-trip float formatting, so reading a table back
//! yields bit-identical coordinates.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use sample_types::Point3d;
use tracing::debug;

use crate::errors::ExportError;

/// Header row of every point table.
pub const HEADER: &str = "x,y,z";

/// Streams points into a table; the header is written on construction.
#[derive(Debug)]
pub struct PointTableWriter<W: Write> {
    inner: W,
    rows: usize,
}

impl<W: Write> PointTableWriter<W> {
    pub fn new(mut inner: W) -> Result<Self, ExportError> {
        writeln!(inner, "{}", HEADER)?;
        Ok(Self { inner, rows: 0 })
    }

    pub fn write_points(&mut self, points: &[Point3d]) -> Result<(), ExportError> {
        for p in points {
            writeln!(self.inner, "{},{},{}", p.x, p.y, p.z)?;
        }
        self.rows += points.len();
        Ok(())
    }

    /// Rows written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W, ExportError> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Write `points` as a complete table. Returns the number of data rows.
pub fn write_rows<W: Write>(writer: W, points: &[Point3d]) -> Result<usize, ExportError> {
    let mut table = PointTableWriter::new(writer)?;
    table.write_points(points)?;
    let rows = table.rows();
    table.finish()?;
    Ok(rows)
}

/// Create (or truncate) `path` and write `points` to it.
pub fn write_csv_file(path: &Path, points: &[Point3d]) -> Result<usize, ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = write_rows(BufWriter::new(file), points)?;
    debug!(path = %path.display(), rows, "wrote point table");
    Ok(rows)
}

/// Read a table written by [`write_rows`]. Blank lines are skipped.
pub fn read_rows<R: BufRead>(reader: R) -> Result<Vec<Point3d>, ExportError> {
    let mut lines = reader.lines();
    match lines.next() {
        Some(header) => {
            let header = header?;
            if header.trim() != HEADER {
                return Err(ExportError::MalformedRow {
                    line: 1,
                    reason: format!("expected header '{}', found '{}'", HEADER, header.trim()),
                });
            }
        }
        None => {
            return Err(ExportError::MalformedRow {
                line: 1,
                reason: "missing header".to_string(),
            })
        }
    }

    let mut points = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        let row = line.trim();
        if row.is_empty() {
            continue;
        }
        points.push(parse_row(row, i + 2)?);
    }
    Ok(points)
}

fn parse_row(row: &str, line: usize) -> Result<Point3d, ExportError> {
    let fields: Vec<&str> = row.split(',').collect();
    if fields.len() != 3 {
        return Err(ExportError::MalformedRow {
            line,
            reason: format!("expected 3 fields, found {}", fields.len()),
        });
    }
    let mut coords = [0.0; 3];
    for (slot, field) in coords.iter_mut().zip(&fields) {
        *slot = field
            .trim()
            .parse::<f64>()
            .map_err(|e| ExportError::MalformedRow {
                line,
                reason: format!("'{}': {}", field.trim(), e),
            })?;
    }
    Ok(Point3d::from_array(coords))
}
