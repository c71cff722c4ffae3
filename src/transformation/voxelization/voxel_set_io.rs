//! Text serialization of voxel sets.
//!
//! The format is line-based:
//!
//! ```text
//! R
//! n
//! x y z
//! ...
//! ```
//!
//! where `R` is the grid resolution, `n` the number of voxels, followed by `n` lines
//! holding the normalized position `(i / R, j / R, k / R)` of each voxel.

use super::VoxelSet;
use crate::math::{Point, Real};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Error raised while reading or writing a voxel set file.
#[derive(thiserror::Error, Debug)]
pub enum VoxelSetFormatError {
    /// The file could not be read or written.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The file content does not describe a valid voxel set.
    #[error("line {line}: {message}")]
    Format {
        /// The 1-based line where the problem was detected.
        line: usize,
        /// A description of the problem.
        message: String,
    },
}

fn format_error(line: usize, message: impl Into<String>) -> VoxelSetFormatError {
    VoxelSetFormatError::Format {
        line,
        message: message.into(),
    }
}

/// Writes `voxels` in the text format to `out`.
pub fn write_voxel_set(voxels: &VoxelSet, mut out: impl Write) -> Result<(), VoxelSetFormatError> {
    writeln!(out, "{}", voxels.resolution())?;
    writeln!(out, "{}", voxels.len())?;

    for p in voxels.normalized_positions() {
        writeln!(out, "{} {} {}", p.x, p.y, p.z)?;
    }

    Ok(())
}

/// Writes `voxels` to the file at `path`, replacing it if it exists.
pub fn save_voxel_set(voxels: &VoxelSet, path: impl AsRef<Path>) -> Result<(), VoxelSetFormatError> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_voxel_set(voxels, &mut out)?;
    out.flush()?;

    log::info!("wrote {} voxels to {}", voxels.len(), path.display());
    Ok(())
}

fn parse_header<T: std::str::FromStr>(
    lines: &[String],
    line_id: usize,
    what: &str,
) -> Result<T, VoxelSetFormatError> {
    let text = lines
        .get(line_id)
        .ok_or_else(|| format_error(line_id + 1, format!("missing {}", what)))?;
    text.trim()
        .parse()
        .map_err(|_| format_error(line_id + 1, format!("invalid {} `{}`", what, text.trim())))
}

/// Reads a voxel set in the text format from `input`.
///
/// Trailing blank lines are ignored.
pub fn read_voxel_set(input: impl BufRead) -> Result<VoxelSet, VoxelSetFormatError> {
    let mut lines = input.lines().collect::<Result<Vec<_>, _>>()?;
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        let _ = lines.pop();
    }

    let resolution: u32 = parse_header(&lines, 0, "resolution")?;
    if resolution == 0 {
        return Err(format_error(1, "the resolution must be positive"));
    }

    let len: usize = parse_header(&lines, 1, "voxel count")?;
    let data = &lines[2..];
    if data.len() != len {
        return Err(format_error(
            2,
            format!("expected {} voxels, found {} lines", len, data.len()),
        ));
    }

    let r = resolution as Real;
    let mut cells = Vec::with_capacity(len);

    for (id, text) in data.iter().enumerate() {
        let line = id + 3;
        let coords = text
            .split_whitespace()
            .map(|tok| tok.parse::<Real>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format_error(line, format!("invalid coordinate: {}", e)))?;

        if coords.len() != 3 {
            return Err(format_error(
                line,
                format!("expected 3 coordinates, found {}", coords.len()),
            ));
        }

        let mut cell = Point::<u32>::origin();
        for i in 0..3 {
            let scaled = coords[i] * r;
            let rounded = scaled.round();

            if !abs_diff_eq!(scaled, rounded, epsilon = 1.0e-3) || rounded < 0.0 || rounded >= r {
                return Err(format_error(
                    line,
                    format!(
                        "the coordinate {} is not a cell position of a grid of resolution {}",
                        coords[i], resolution
                    ),
                ));
            }

            cell[i] = rounded as u32;
        }

        cells.push(cell);
    }

    Ok(VoxelSet::new(resolution, cells))
}

/// Reads the voxel set stored in the file at `path`.
pub fn load_voxel_set(path: impl AsRef<Path>) -> Result<VoxelSet, VoxelSetFormatError> {
    read_voxel_set(BufReader::new(File::open(path)?))
}
