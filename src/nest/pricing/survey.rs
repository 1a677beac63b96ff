use std::collections::BTreeMap;
use std::path::Path;

use tracing::{error, info, instrument, warn};

use crate::nest::pricing::error::{Result, ToolError};
use crate::nest::pricing::io::excel_read::{self, SheetGrid};
use crate::nest::pricing::model::{
    CellValue, DocumentProbe, DocumentStatus, SheetSurvey, VendorSurvey,
};

/// Number of leading data rows captured in each sheet preview.
pub const PREVIEW_ROWS: usize = 10;
/// Default file name of the vendor calculation workbook.
pub const VENDOR_WORKBOOK: &str = "book5.xlsx";
/// Default file name of the vendor quotation document.
pub const VENDOR_DOCUMENT: &str = "Angebot_-_15014024.pdf";

const PENDING_REVIEW_MESSAGE: &str = "Manual PDF review needed";

/// Surveys a vendor workbook of unknown layout.
///
/// A missing file means the vendor data has not been supplied yet and yields
/// `None`, as does a workbook that cannot be parsed.
#[instrument(level = "info", skip_all, fields(input = %path.display()))]
pub fn survey_vendor_workbook(path: &Path) -> Option<VendorSurvey> {
    match read_survey(path) {
        Ok(survey) => {
            info!(sheets = ?survey.sheet_names, "surveyed vendor workbook");
            Some(survey)
        }
        Err(ToolError::MissingInput(path)) => {
            warn!(
                path = %path.display(),
                "vendor workbook not found; supply it to enable comparison"
            );
            None
        }
        Err(err) => {
            error!(error = %err, "vendor workbook could not be surveyed");
            None
        }
    }
}

fn read_survey(path: &Path) -> Result<VendorSurvey> {
    let sheets = excel_read::open_sheets(path)?;

    let mut survey = VendorSurvey {
        sheet_names: Vec::with_capacity(sheets.len()),
        sheets: BTreeMap::new(),
    };
    for (name, grid) in sheets {
        let sheet = survey_sheet(&grid);
        info!(sheet = %name, rows = sheet.shape.0, columns = sheet.shape.1, "surveyed sheet");
        survey.sheet_names.push(name.clone());
        survey.sheets.insert(name, sheet);
    }
    Ok(survey)
}

/// Captures the shape, column identifiers and a column-major preview of a grid.
pub fn survey_sheet(grid: &SheetGrid) -> SheetSurvey {
    let columns = grid.columns().to_vec();
    let head: Vec<&[CellValue]> = grid.rows().take(PREVIEW_ROWS).collect();

    let preview = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let values = head
                .iter()
                .map(|row| row.get(index).cloned().unwrap_or(CellValue::Empty))
                .collect();
            (column.clone(), values)
        })
        .collect();

    SheetSurvey {
        shape: grid.shape(),
        columns,
        preview,
    }
}

/// Records the presence of the vendor quotation document.
///
/// The document text is not extracted; a present document is flagged for
/// manual review.
#[instrument(level = "info", skip_all, fields(input = %path.display()))]
pub fn probe_quotation(path: &Path) -> Option<DocumentProbe> {
    if !path.exists() {
        warn!("quotation document not found; supply it for manual review");
        return None;
    }

    info!("quotation document found; text extraction is not available");
    Some(DocumentProbe {
        path: path.to_path_buf(),
        status: DocumentStatus::Pending,
        message: PENDING_REVIEW_MESSAGE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_column_major_and_capped() {
        let rows = (0..15)
            .map(|index| vec![CellValue::Number(index as f64), CellValue::Empty])
            .collect();
        let grid = SheetGrid::new(
            vec![CellValue::Text("Pos".into()), CellValue::Text("Preis".into())],
            rows,
        );

        let survey = survey_sheet(&grid);

        assert_eq!(survey.shape, (15, 2));
        assert_eq!(survey.columns, ["Pos", "Preis"]);
        let order: Vec<&str> = survey.preview.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(order, ["Pos", "Preis"]);
        let positions = survey.preview_column("Pos").expect("position column");
        assert_eq!(positions.len(), PREVIEW_ROWS);
        assert_eq!(positions[9], CellValue::Number(9.0));
        let prices = survey.preview_column("Preis").expect("price column");
        assert!(prices.iter().all(|cell| *cell == CellValue::Empty));
        assert!(survey.preview_column("Menge").is_none());
    }
}
