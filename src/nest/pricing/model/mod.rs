use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display format used for date cells, matching how spreadsheet tools print
/// timestamps without a zone.
pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single spreadsheet cell after coercion. Error cells read as [`CellValue::Empty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Null cell; serialized as JSON `null`.
    Empty,
    /// Boolean literal.
    Bool(bool),
    /// Any numeric cell. Integers are widened.
    Number(f64),
    /// Date or date-time cell.
    DateTime(NaiveDateTime),
    /// Plain text.
    Text(String),
}

impl CellValue {
    /// Returns `true` for null cells and for text that is blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the numeric content of the cell, accepting numeric text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(value) => value.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Number(value) => write!(f, "{}", format_number(*value)),
            CellValue::DateTime(value) => write!(f, "{}", value.format(DATE_DISPLAY_FORMAT)),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Cell of an emitted template tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl TableValue {
    /// Wraps a monetary amount, keeping whole amounts as integers so the
    /// serialized output reads `5000` rather than `5000.0`.
    pub fn amount(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
            TableValue::Integer(value as i64)
        } else {
            TableValue::Number(value)
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        TableValue::Text(value.into())
    }
}

/// Fixed-price optional components. Declaration order is the column order of
/// the pricing sheet and the iteration order of [`PricingModel::add_ons`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOn {
    PvPanele,
    FensterPvc,
    FensterFichte,
    FensterEiche,
    FensterAlu,
    PlanungBasis,
    PlanungPlus,
    PlanungPro,
    Grundstueckscheck,
}

impl AddOn {
    pub const ALL: [AddOn; 9] = [
        AddOn::PvPanele,
        AddOn::FensterPvc,
        AddOn::FensterFichte,
        AddOn::FensterEiche,
        AddOn::FensterAlu,
        AddOn::PlanungBasis,
        AddOn::PlanungPlus,
        AddOn::PlanungPro,
        AddOn::Grundstueckscheck,
    ];

    /// Identifier used as the JSON key and as the template component id.
    pub fn key(self) -> &'static str {
        match self {
            AddOn::PvPanele => "pv_panele",
            AddOn::FensterPvc => "fenster_pvc",
            AddOn::FensterFichte => "fenster_fichte",
            AddOn::FensterEiche => "fenster_eiche",
            AddOn::FensterAlu => "fenster_alu",
            AddOn::PlanungBasis => "planung_basis",
            AddOn::PlanungPlus => "planung_plus",
            AddOn::PlanungPro => "planung_pro",
            AddOn::Grundstueckscheck => "grundstueckscheck",
        }
    }
}

/// One priced (envelope, cladding, flooring) tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    pub gebaeudehuelle: String,
    pub innenverkleidung: String,
    pub fussboden: String,
    pub base_price: f64,
    pub per_module_price: f64,
    /// Untouched composite label the three dimensions were split from.
    pub original_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingMetadata {
    /// Opaque display string read from the sheet, or `"Unknown"`.
    pub last_updated: String,
    pub combinations_count: usize,
    pub has_ohne_belag: bool,
}

/// Normalised view of the current configurator pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingModel {
    pub base_combinations: Vec<Combination>,
    pub add_ons: BTreeMap<AddOn, f64>,
    pub metadata: PricingMetadata,
}

impl PricingModel {
    /// Returns the `(min, max)` base price, or `(0, 0)` when there are no combinations.
    pub fn price_range(&self) -> (f64, f64) {
        let mut prices = self.base_combinations.iter().map(|combo| combo.base_price);
        match prices.next() {
            Some(first) => prices.fold((first, first), |(min, max), price| {
                (min.min(price), max.max(price))
            }),
            None => (0.0, 0.0),
        }
    }

    pub fn gebaeudehuelle_types(&self) -> BTreeSet<String> {
        self.distinct(|combo| &combo.gebaeudehuelle)
    }

    pub fn innenverkleidung_types(&self) -> BTreeSet<String> {
        self.distinct(|combo| &combo.innenverkleidung)
    }

    pub fn fussboden_types(&self) -> BTreeSet<String> {
        self.distinct(|combo| &combo.fussboden)
    }

    fn distinct(&self, field: impl Fn(&Combination) -> &String) -> BTreeSet<String> {
        self.base_combinations
            .iter()
            .map(|combo| field(combo).clone())
            .collect()
    }
}

/// Structural inventory of a single vendor sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSurvey {
    /// `(data rows, columns)`.
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    /// First rows of the sheet as `(column, values top to bottom)` pairs in
    /// sheet column order.
    pub preview: Vec<(String, Vec<CellValue>)>,
}

impl SheetSurvey {
    /// Preview values of the named column.
    pub fn preview_column(&self, column: &str) -> Option<&[CellValue]> {
        self.preview
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, values)| values.as_slice())
    }
}

/// Discovery artifact describing a vendor workbook whose layout is not yet known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSurvey {
    /// Sheet names in workbook order.
    pub sheet_names: Vec<String>,
    pub sheets: BTreeMap<String, SheetSurvey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
}

/// Presence record for the vendor quotation document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentProbe {
    pub path: PathBuf,
    pub status: DocumentStatus,
    pub message: String,
}
