use std::path::Path;

use rust_xlsxwriter::{Table, TableColumn, Workbook};

use crate::nest::pricing::emit::PricingTemplate;
use crate::nest::pricing::error::Result;
use crate::nest::pricing::model::TableValue;

/// Writes every template tab as a worksheet with a header row and an
/// autofiltered table over the data.
pub fn write_template(path: &Path, template: &PricingTemplate) -> Result<()> {
    let mut workbook_writer = Workbook::new();

    for tab in &template.tabs {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(&tab.name)?;

        for (col_idx, header) in tab.columns.iter().enumerate() {
            worksheet.write_string(0, col_idx as u16, header)?;
        }

        for (row_idx, row) in tab.data.iter().enumerate() {
            let sheet_row = (row_idx + 1) as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let sheet_col = col_idx as u16;
                match cell {
                    TableValue::Integer(value) => {
                        worksheet.write_number(sheet_row, sheet_col, *value as f64)?;
                    }
                    TableValue::Number(value) => {
                        worksheet.write_number(sheet_row, sheet_col, *value)?;
                    }
                    TableValue::Text(value) if value.is_empty() => {}
                    TableValue::Text(value) => {
                        worksheet.write_string(sheet_row, sheet_col, value)?;
                    }
                }
            }
        }

        // Excel tables need at least one data row.
        if tab.data.is_empty() || tab.columns.is_empty() {
            continue;
        }

        let columns: Vec<TableColumn> = tab
            .columns
            .iter()
            .map(|header| TableColumn::new().set_header(header))
            .collect();
        let mut excel_table = Table::new();
        excel_table.set_autofilter(true).set_columns(&columns);

        let col_end = (tab.columns.len() as u16).saturating_sub(1);
        let row_end = tab.data.len() as u32;
        worksheet.add_table(0, 0, row_end, col_end, &excel_table)?;
    }

    workbook_writer.save(path)?;
    Ok(())
}
