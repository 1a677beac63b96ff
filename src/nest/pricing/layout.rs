//! Fixed cell layout of the "Preise Website" sheet.
//!
//! Row indices are data rows, i.e. the sheet row below the header line is row 0.
//! Column indices are zero-based from column A.

use std::ops::RangeInclusive;

use crate::nest::pricing::model::AddOn;

/// Workbook holding the current configurator pricing.
pub const CURRENT_WORKBOOK: &str = "Preiskalkulation.xlsx";
/// Sheet of [`CURRENT_WORKBOOK`] the pricing is read from.
pub const PRICING_SHEET: &str = "Preise Website";

/// Row carrying the human-readable column labels.
pub const HEADER_ROW: usize = 1;
/// Rows scanned for base combinations.
pub const COMBINATION_ROWS: RangeInclusive<usize> = 2..=28;
/// Row the add-on prices are read from.
pub const ADD_ON_ROW: usize = 2;
/// Row holding the last-updated stamp.
pub const METADATA_ROW: usize = 0;

pub const LABEL_COLUMN: usize = 2;
pub const BASE_PRICE_COLUMN: usize = 3;
pub const PER_MODULE_COLUMN: usize = 4;
pub const LAST_UPDATED_COLUMN: usize = 13;

/// Column of each add-on price on [`ADD_ON_ROW`].
pub fn add_on_column(add_on: AddOn) -> usize {
    match add_on {
        AddOn::PvPanele => 5,
        AddOn::FensterPvc => 6,
        AddOn::FensterFichte => 7,
        AddOn::FensterEiche => 8,
        AddOn::FensterAlu => 9,
        AddOn::PlanungBasis => 10,
        AddOn::PlanungPlus => 11,
        AddOn::PlanungPro => 12,
        AddOn::Grundstueckscheck => 13,
    }
}

/// Number of columns a sheet must span for every offset above to resolve.
pub fn required_width() -> usize {
    let add_on_max = AddOn::ALL.into_iter().map(add_on_column).max().unwrap_or(0);
    [
        LABEL_COLUMN,
        BASE_PRICE_COLUMN,
        PER_MODULE_COLUMN,
        LAST_UPDATED_COLUMN,
        add_on_max,
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
        + 1
}

/// Placeholder identifier given to a column whose header cell is empty.
pub fn unnamed_column(index: usize) -> String {
    format!("Unnamed: {index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_on_columns_are_contiguous_after_prices() {
        let columns: Vec<usize> = AddOn::ALL.into_iter().map(add_on_column).collect();
        assert_eq!(columns, (5..=13).collect::<Vec<_>>());
        assert_eq!(required_width(), 14);
    }
}
