use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, error, info, instrument, warn};

use crate::nest::pricing::error::{Result, ToolError};
use crate::nest::pricing::io::excel_read::SheetGrid;
use crate::nest::pricing::layout::{
    self, ADD_ON_ROW, BASE_PRICE_COLUMN, COMBINATION_ROWS, HEADER_ROW, LABEL_COLUMN,
    LAST_UPDATED_COLUMN, METADATA_ROW, PER_MODULE_COLUMN,
};
use crate::nest::pricing::model::{AddOn, CellValue, Combination, PricingMetadata, PricingModel};

/// Separator between the three dimensions of a combination label. A bare comma
/// is not a separator, so decimal commas such as `2,5 cm` stay inside a part.
pub const LABEL_DELIMITER: &str = ", ";
/// Value of `last_updated` when the sheet carries no stamp.
pub const UNKNOWN_LAST_UPDATED: &str = "Unknown";

/// Loads the current pricing workbook and builds the model from it.
///
/// Any failure is logged and reported as `None`; a partially built model is
/// never returned.
#[instrument(level = "info", skip_all, fields(input = %path.display(), sheet = %sheet))]
pub fn load_current_pricing(path: &Path, sheet: &str) -> Option<PricingModel> {
    let result = SheetGrid::open(path, sheet).and_then(|grid| build_pricing_model(&grid));
    match result {
        Ok(model) => {
            info!(
                combinations = model.metadata.combinations_count,
                add_ons = model.add_ons.len(),
                last_updated = %model.metadata.last_updated,
                "loaded current pricing"
            );
            Some(model)
        }
        Err(err) => {
            error!(error = %err, "current pricing unavailable");
            None
        }
    }
}

/// Extracts the pricing model from a grid laid out as described in
/// [`layout`](crate::nest::pricing::layout).
pub fn build_pricing_model(grid: &SheetGrid) -> Result<PricingModel> {
    let (_, width) = grid.shape();
    if width < layout::required_width() {
        warn!(
            width,
            required = layout::required_width(),
            "pricing sheet is narrower than the expected layout"
        );
    }

    if let Some(header) = grid.row(HEADER_ROW) {
        let labels: Vec<String> = header.iter().map(CellValue::to_string).collect();
        debug!(?labels, "pricing sheet header");
    }

    let base_combinations = read_combinations(grid)?;
    let add_ons = read_add_ons(grid);

    let last_updated = grid
        .cell(METADATA_ROW, LAST_UPDATED_COLUMN)
        .map(CellValue::to_string)
        .unwrap_or_else(|| UNKNOWN_LAST_UPDATED.to_string());

    let has_ohne_belag = base_combinations
        .iter()
        .any(|combo| combo.fussboden.to_lowercase().contains("ohne"));

    let metadata = PricingMetadata {
        last_updated,
        combinations_count: base_combinations.len(),
        has_ohne_belag,
    };

    Ok(PricingModel {
        base_combinations,
        add_ons,
        metadata,
    })
}

fn read_combinations(grid: &SheetGrid) -> Result<Vec<Combination>> {
    let (height, _) = grid.shape();
    let mut combinations = Vec::new();

    for row in COMBINATION_ROWS {
        if row >= height {
            break;
        }

        let label = match grid.cell(row, LABEL_COLUMN) {
            Some(cell) if !cell.is_blank() => cell.to_string(),
            _ => continue,
        };

        let Some((gebaeudehuelle, innenverkleidung, fussboden)) = split_label(&label) else {
            debug!(row, %label, "skipping label with fewer than three parts");
            continue;
        };

        combinations.push(Combination {
            gebaeudehuelle,
            innenverkleidung,
            fussboden,
            base_price: read_price(grid, row, BASE_PRICE_COLUMN)?,
            per_module_price: read_price(grid, row, PER_MODULE_COLUMN)?,
            original_name: label,
        });
    }

    Ok(combinations)
}

/// Reads the add-on prices. An unusable add-on cell is logged and priced at
/// zero so it never discards the base combinations.
fn read_add_ons(grid: &SheetGrid) -> BTreeMap<AddOn, f64> {
    AddOn::ALL
        .into_iter()
        .map(|add_on| {
            let column = layout::add_on_column(add_on);
            let price = read_price(grid, ADD_ON_ROW, column).unwrap_or_else(|err| {
                warn!(add_on = add_on.key(), error = %err, "add-on price unusable; using 0");
                0.0
            });
            (add_on, price)
        })
        .collect()
}

/// Splits a composite label into its first three trimmed parts.
pub fn split_label(label: &str) -> Option<(String, String, String)> {
    let mut parts = label.split(LABEL_DELIMITER).map(str::trim);
    let first = parts.next()?;
    let second = parts.next()?;
    let third = parts.next()?;
    Some((first.to_string(), second.to_string(), third.to_string()))
}

/// Reads a non-negative amount; a null cell counts as zero.
fn read_price(grid: &SheetGrid, row: usize, column: usize) -> Result<f64> {
    let Some(cell) = grid.cell(row, column) else {
        return Ok(0.0);
    };
    if cell.is_blank() {
        return Ok(0.0);
    }

    match cell.as_number() {
        Some(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ToolError::InvalidCell {
            row,
            column,
            value: cell.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_label_trims_and_ignores_extra_parts() {
        assert_eq!(
            split_label("  Holz ,   Fichte ,  Parkett , Extra"),
            Some(("Holz".into(), "Fichte".into(), "Parkett".into()))
        );
        assert_eq!(split_label("Holz, Fichte"), None);
        assert_eq!(split_label("Holz"), None);
    }

    #[test]
    fn decimal_commas_stay_inside_a_part() {
        assert_eq!(
            split_label("Holzlattung 2,5 cm, Fichte, Parkett"),
            Some(("Holzlattung 2,5 cm".into(), "Fichte".into(), "Parkett".into()))
        );
    }

    #[test]
    fn bare_commas_do_not_separate_parts() {
        assert_eq!(split_label("Holz,Fichte,Parkett"), None);
        assert_eq!(split_label("Holz,Fichte, Parkett"), None);
    }
}
