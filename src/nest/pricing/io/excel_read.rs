use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::nest::pricing::error::{Result, ToolError};
use crate::nest::pricing::layout::unnamed_column;
use crate::nest::pricing::model::CellValue;

type Workbook = Xlsx<BufReader<File>>;

/// A worksheet loaded as a header line plus data rows.
///
/// The first sheet row supplies the column identifiers; every following row is
/// a data row, so data row `0` is the second line of the sheet. Columns always
/// start at column A, regardless of where the used range begins.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    /// Builds a grid from an already coerced header line and data rows. Short
    /// rows are padded with [`CellValue::Empty`].
    pub fn new(header: Vec<CellValue>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);

        let columns = column_names(&header, width);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Materialises a calamine range using absolute sheet coordinates.
    pub fn from_range(range: &Range<DataType>) -> Self {
        let Some((end_row, end_col)) = range.end() else {
            return Self::new(Vec::new(), Vec::new());
        };

        let read_row = |row: u32| -> Vec<CellValue> {
            (0..=end_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(cell_from_data)
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        };

        let header = read_row(0);
        let rows = (1..=end_row).map(read_row).collect();
        Self::new(header, rows)
    }

    /// Loads `sheet` from the workbook at `path`.
    pub fn open(path: &Path, sheet: &str) -> Result<Self> {
        let mut workbook = open_xlsx(path)?;
        let range = read_required_sheet(&mut workbook, sheet)?;
        Ok(Self::from_range(&range))
    }

    /// `(data rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Returns the cell at `(row, col)`, or `None` when it is null or out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .filter(|cell| !Self::is_null(Some(*cell)))
    }

    /// Same as [`SheetGrid::cell`], addressing the column by its identifier.
    pub fn cell_by_header(&self, row: usize, header: &str) -> Option<&CellValue> {
        self.column_index(header).and_then(|col| self.cell(row, col))
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == header)
    }

    pub fn is_null(cell: Option<&CellValue>) -> bool {
        matches!(cell, None | Some(CellValue::Empty))
    }
}

/// Loads every sheet of a workbook in workbook order.
pub fn open_sheets(path: &Path) -> Result<Vec<(String, SheetGrid)>> {
    let mut workbook = open_xlsx(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = read_required_sheet(&mut workbook, &name)?;
        sheets.push((name, SheetGrid::from_range(&range)));
    }
    Ok(sheets)
}

fn open_xlsx(path: &Path) -> Result<Workbook> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }
    let workbook: Workbook = open_workbook(path)?;
    Ok(workbook)
}

fn read_required_sheet(workbook: &mut Workbook, name: &str) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::MissingSheet(name.to_string()))?;
    range_result.map_err(|source| ToolError::SheetLoad {
        sheet: name.to_string(),
        source,
    })
}

fn cell_from_data(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty | DataType::Error(_) => CellValue::Empty,
        DataType::String(value) => CellValue::Text(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Bool(*value),
        DataType::DateTime(serial) => excel_serial_to_datetime(*serial)
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Number(*serial)),
        other => CellValue::Text(other.to_string()),
    }
}

/// Converts an Excel 1900-system serial date into a timestamp.
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

fn column_names(header: &[CellValue], width: usize) -> Vec<String> {
    let mut registry = ColumnNameRegistry::default();
    (0..width)
        .map(|index| {
            let raw = match header.get(index) {
                Some(cell) if !cell.is_blank() => cell.to_string(),
                _ => unnamed_column(index),
            };
            registry.assign(raw)
        })
        .collect()
}

/// Keeps column identifiers unique by suffixing repeats with `.1`, `.2`, ...
#[derive(Debug, Default)]
struct ColumnNameRegistry {
    used: HashSet<String>,
}

impl ColumnNameRegistry {
    fn assign(&mut self, raw: String) -> String {
        if self.used.insert(raw.clone()) {
            return raw;
        }

        let mut counter = 1;
        loop {
            let candidate = format!("{raw}.{counter}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}
