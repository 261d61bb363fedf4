//! Width-checked encoders for the individual fields of PDB records.
//!
//! Every encoder returns exactly as many characters as its field is wide.
//! Values that do not fit fail with [`PackError::FieldOverflow`]; nothing is
//! ever truncated.

use super::packer::PackError;
use crate::core::utils::dates::format_pdb_date;
use chrono::NaiveDate;

pub const ATOM_NAME_WIDTH: usize = 4;
pub const SERIAL_WIDTH: usize = 5;
pub const RESIDUE_NAME_WIDTH: usize = 3;
pub const RESIDUE_SEQ_WIDTH: usize = 4;
pub const COORDINATE_WIDTH: usize = 8;
pub const OCCUPANCY_WIDTH: usize = 6;
pub const ELEMENT_WIDTH: usize = 2;
pub const CHARGE_WIDTH: usize = 2;
pub const CODE_WIDTH: usize = 4;
pub const DATE_WIDTH: usize = 9;

fn overflow(field: &'static str, width: usize, value: impl ToString) -> PackError {
    PackError::FieldOverflow {
        field,
        width,
        value: value.to_string(),
    }
}

/// Right-aligns `value` in `width` columns.
pub fn right(field: &'static str, value: &str, width: usize) -> Result<String, PackError> {
    if value.chars().count() > width {
        return Err(overflow(field, width, value));
    }
    Ok(format!("{:>width$}", value))
}

/// Left-aligns `value` in `width` columns.
pub fn left(field: &'static str, value: &str, width: usize) -> Result<String, PackError> {
    if value.chars().count() > width {
        return Err(overflow(field, width, value));
    }
    Ok(format!("{:<width$}", value))
}

/// Right-aligned integer, blank when absent.
pub fn integer(field: &'static str, value: Option<i64>, width: usize) -> Result<String, PackError> {
    match value {
        Some(v) => right(field, &v.to_string(), width),
        None => Ok(" ".repeat(width)),
    }
}

/// Right-aligned text, blank when absent.
pub fn text(field: &'static str, value: Option<&str>, width: usize) -> Result<String, PackError> {
    right(field, value.unwrap_or(""), width)
}

/// A single-column field, blank when absent.
pub fn flag(value: Option<char>) -> char {
    value.unwrap_or(' ')
}

/// Right-aligned fixed-precision decimal, blank when absent.
pub fn decimal(
    field: &'static str,
    value: Option<f64>,
    precision: usize,
    width: usize,
) -> Result<String, PackError> {
    match value {
        Some(v) => right(field, &format!("{:.precision$}", v), width),
        None => Ok(" ".repeat(width)),
    }
}

/// The four-column atom name.
///
/// Names of up to three characters start in the second column, leaving the
/// first one blank; four-character names take the whole field.
pub fn atom_name(name: Option<&str>) -> Result<String, PackError> {
    let name = name.unwrap_or("");
    if name.chars().count() >= ATOM_NAME_WIDTH {
        left("atom name", name, ATOM_NAME_WIDTH)
    } else {
        Ok(format!(" {:<3}", name))
    }
}

pub fn coordinate(field: &'static str, value: Option<f64>) -> Result<String, PackError> {
    decimal(field, value, 3, COORDINATE_WIDTH)
}

/// Occupancy, blank whenever it prints as full occupancy (`1.00`).
pub fn occupancy(value: f64) -> Result<String, PackError> {
    let printed = format!("{:.2}", value);
    if printed == "1.00" {
        return Ok(" ".repeat(OCCUPANCY_WIDTH));
    }
    right("occupancy", &printed, OCCUPANCY_WIDTH)
}

pub fn temp_factor(value: Option<f64>) -> Result<String, PackError> {
    decimal("temperature factor", value, 2, OCCUPANCY_WIDTH)
}

/// Formal charge as magnitude followed by sign (`2-`, `1+`), blank when neutral.
pub fn charge(value: i32) -> Result<String, PackError> {
    if value == 0 {
        return Ok(" ".repeat(CHARGE_WIDTH));
    }
    let sign = if value < 0 { '-' } else { '+' };
    right(
        "charge",
        &format!("{}{}", value.unsigned_abs(), sign),
        CHARGE_WIDTH,
    )
}

/// `DD-MON-YY`, blank when absent.
pub fn date(value: Option<NaiveDate>) -> String {
    match value {
        Some(d) => format_pdb_date(d),
        None => " ".repeat(DATE_WIDTH),
    }
}
