use crate::error::{Result, StorageError};

/// Points awarded for a code that has no row in the multiplier sheet.
pub const DEFAULT_MULTIPLIER: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMultiplier {
    pub secret_code: String,
    pub multiplier: i64,
}

/// Parses a multiplier cell. A blank cell counts as the default multiplier and
/// whole decimals such as `5.00` read as integers.
pub fn parse_multiplier(cell: &str) -> Result<i64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(DEFAULT_MULTIPLIER);
    }

    if let Ok(value) = cell.parse::<i64>() {
        return Ok(value);
    }

    match cell.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => Ok(value as i64),
        _ => Err(StorageError::Malformed(format!(
            "multiplier '{}' is not an integer",
            cell
        ))),
    }
}
