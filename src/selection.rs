use crate::error::{GalleryError, Result};
use std::num::IntErrorKind;

/// Parse user-entered row numbers such as `"2, 5,17"`.
///
/// Tokens are split on commas and trimmed. Any token that is not an integer,
/// including an empty token between two commas, rejects the whole input.
/// Blank input selects nothing.
///
/// The numbers are returned as entered (1-based, unfiltered); use
/// [`select_rows`] to bound them against a table. Integers too large for
/// `i64` saturate to `i64::MAX` / `i64::MIN`, which no table can contain.
///
/// # Examples
/// ```
/// use sheet_gallery::selection::parse_row_numbers;
///
/// assert_eq!(parse_row_numbers(" 2, 5 ").unwrap(), vec![2, 5]);
/// assert!(parse_row_numbers("2,x").is_err());
/// assert!(parse_row_numbers("   ").unwrap().is_empty());
/// ```
pub fn parse_row_numbers(input: &str) -> Result<Vec<i64>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    input
        .split(',')
        .map(str::trim)
        .map(|token| match token.parse::<i64>() {
            Ok(n) => Ok(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(i64::MAX),
                IntErrorKind::NegOverflow => Ok(i64::MIN),
                _ => Err(GalleryError::InvalidRowNumber(token.to_string())),
            },
        })
        .collect()
}

/// Convert 1-based row numbers into 0-based row indices of a table with
/// `table_len` rows.
///
/// Numbers outside `[1, table_len]` are dropped without error. Order and
/// repeats are kept.
pub fn select_rows(numbers: &[i64], table_len: usize) -> Vec<usize> {
    numbers
        .iter()
        .filter_map(|&n| usize::try_from(n).ok())
        .filter(|&n| n >= 1 && n <= table_len)
        .map(|n| n - 1)
        .collect()
}
