//! JSON export of circle lists

use crate::configuration::Circle;
use crate::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Pretty-printed JSON array of circles
pub fn to_json(circles: &[Circle]) -> Result<String> {
    Ok(serde_json::to_string_pretty(circles)?)
}

/// Write circles as a JSON array
pub fn write_json<P: AsRef<Path>>(circles: &[Circle], path: P) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, circles)?;
    Ok(())
}

/// Read a JSON array of circles written by [`write_json`]
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Vec<Circle>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
