use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::nest::pricing::compare::ComparisonResult;
use crate::nest::pricing::model::{DocumentProbe, PricingModel, TableValue, VendorSurvey};

/// Version stamped into every emitted template.
pub const TEMPLATE_VERSION: &str = "1.0.0";
pub const TEMPLATE_DESCRIPTION: &str = "Hoam-House Configurator Pricing Template";
/// Default output path of the import template.
pub const TEMPLATE_FILE: &str = "google_sheets_pricing_template.json";
/// Default output path of the comparison report.
pub const REPORT_FILE: &str = "pricing_comparison_report.json";

pub const BASE_PRICING_TAB: &str = "Base Module Pricing";
pub const ADD_ON_TAB: &str = "Add-On Components";
pub const SIZE_DEPENDENT_TAB: &str = "Size-Dependent Pricing";
pub const PERCENTAGE_TAB: &str = "Percentage-Based Pricing";

const SCALING_FORMULA: &str = "base * (1 + 0.25 * additional_modules)";
const PER_UNIT_SCALING_FORMULA: &str = "base * (1 + 0.25 * additional_modules) * quantity";
const EXPOSURE_FORMULA: &str = "nest_size * percentage * material_price";

/// Import-ready template, one entry per spreadsheet tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTemplate {
    pub metadata: TemplateMetadata,
    pub tabs: Vec<TemplateTab>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    pub version: String,
    pub created: NaiveDateTime,
    pub description: String,
}

/// A tab that will be materialised as a sheet on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateTab {
    pub name: String,
    pub columns: Vec<String>,
    pub data: Vec<Vec<TableValue>>,
}

impl TemplateTab {
    fn new(name: &str, columns: &[&str], data: Vec<Vec<TableValue>>) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|column| column.to_string()).collect(),
            data,
        }
    }
}

/// Builds the four-tab template. The base and add-on tabs are empty when no
/// current pricing is available; the last two tabs are fixed tables.
pub fn build_template(current: Option<&PricingModel>, created: NaiveDateTime) -> PricingTemplate {
    let base_rows = current
        .map(|model| {
            model
                .base_combinations
                .iter()
                .map(|combo| {
                    vec![
                        TableValue::text(&combo.gebaeudehuelle),
                        TableValue::text(&combo.innenverkleidung),
                        TableValue::text(&combo.fussboden),
                        TableValue::amount(combo.base_price),
                        TableValue::amount(combo.per_module_price),
                        TableValue::text(""),
                    ]
                })
                .collect()
        })
        .unwrap_or_default();

    let add_on_rows = current
        .map(|model| {
            model
                .add_ons
                .iter()
                .map(|(add_on, price)| {
                    vec![
                        TableValue::text(add_on.key()),
                        TableValue::text(display_name(add_on.key())),
                        TableValue::text("fixed"),
                        TableValue::amount(*price),
                        TableValue::text("per unit"),
                        TableValue::text(""),
                        TableValue::text(""),
                    ]
                })
                .collect()
        })
        .unwrap_or_default();

    let tabs = vec![
        TemplateTab::new(
            BASE_PRICING_TAB,
            &[
                "Gebäudehülle",
                "Innenverkleidung",
                "Fussboden",
                "Base Price (Hoam 80)",
                "Per Module Price",
                "Notes",
            ],
            base_rows,
        ),
        TemplateTab::new(
            ADD_ON_TAB,
            &[
                "Component ID",
                "Component Name",
                "Price Type",
                "Base Price",
                "Unit",
                "Scaling Formula",
                "Notes",
            ],
            add_on_rows,
        ),
        TemplateTab::new(
            SIZE_DEPENDENT_TAB,
            &[
                "Component",
                "Base Price (Hoam 80)",
                "Scaling Factor",
                "Formula",
                "Notes",
            ],
            size_dependent_rows(),
        ),
        TemplateTab::new(
            PERCENTAGE_TAB,
            &[
                "Component",
                "Percentage",
                "Base Material Price",
                "Formula",
                "Notes",
            ],
            percentage_rows(),
        ),
    ];

    PricingTemplate {
        metadata: TemplateMetadata {
            version: TEMPLATE_VERSION.to_string(),
            created,
            description: TEMPLATE_DESCRIPTION.to_string(),
        },
        tabs,
    }
}

/// Components priced from a Hoam 80 base and scaled per additional module.
pub fn size_dependent_rows() -> Vec<Vec<TableValue>> {
    [
        ("Elektrische Fußbodenheizung", 5000, SCALING_FORMULA, ""),
        ("Wassergeführte Fußbodenheizung", 7500, SCALING_FORMULA, ""),
        ("Fundament", 5000, SCALING_FORMULA, ""),
        ("Geschossdecke", 5000, PER_UNIT_SCALING_FORMULA, "Per unit"),
    ]
    .into_iter()
    .map(|(component, base, formula, notes)| {
        vec![
            TableValue::text(component),
            TableValue::Integer(base),
            TableValue::Number(0.25),
            TableValue::text(formula),
            TableValue::text(notes),
        ]
    })
    .collect()
}

/// Exposure packages priced as a share of the window material price.
pub fn percentage_rows() -> Vec<Vec<TableValue>> {
    [
        ("Belichtungspaket Light", 12),
        ("Belichtungspaket Medium", 16),
        ("Belichtungspaket Bright", 22),
    ]
    .into_iter()
    .map(|(component, percentage)| {
        vec![
            TableValue::text(component),
            TableValue::Integer(percentage),
            TableValue::Integer(280),
            TableValue::text(EXPOSURE_FORMULA),
            TableValue::text("PVC default"),
        ]
    })
    .collect()
}

/// Turns an identifier such as `planung_basis` into `Planung Basis`.
pub fn display_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    let mut after_letter = false;

    for ch in key.chars() {
        let ch = if ch == '_' || ch == '-' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if after_letter {
                name.extend(ch.to_lowercase());
            } else {
                name.extend(ch.to_uppercase());
            }
            after_letter = true;
        } else {
            name.push(ch);
            after_letter = false;
        }
    }

    name
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Statistics derived from the current pricing model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSummary {
    pub total_combinations: usize,
    pub add_ons_count: usize,
    pub price_range: PriceRange,
    pub gebaeudehuelle_types: BTreeSet<String>,
    pub innenverkleidung_types: BTreeSet<String>,
    pub fussboden_types: BTreeSet<String>,
}

impl PricingSummary {
    pub fn from_model(model: &PricingModel) -> Self {
        let (min, max) = model.price_range();
        Self {
            total_combinations: model.base_combinations.len(),
            add_ons_count: model.add_ons.len(),
            price_range: PriceRange { min, max },
            gebaeudehuelle_types: model.gebaeudehuelle_types(),
            innenverkleidung_types: model.innenverkleidung_types(),
            fussboden_types: model.fussboden_types(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetShape {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

/// Shape overview of the surveyed vendor workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSummary {
    pub sheet_count: usize,
    pub sheets: Vec<SheetShape>,
}

impl VendorSummary {
    pub fn from_survey(survey: &VendorSurvey) -> Self {
        let sheets = survey
            .sheet_names
            .iter()
            .filter_map(|name| {
                survey.sheets.get(name).map(|sheet| SheetShape {
                    name: name.clone(),
                    rows: sheet.shape.0,
                    columns: sheet.shape.1,
                })
            })
            .collect::<Vec<_>>();

        Self {
            sheet_count: sheets.len(),
            sheets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingReport {
    pub timestamp: NaiveDateTime,
    pub current_pricing_summary: Option<PricingSummary>,
    pub new_pricing_summary: Option<VendorSummary>,
    pub quotation: Option<DocumentProbe>,
    pub comparison: ComparisonResult,
}

pub fn build_report(
    current: Option<&PricingModel>,
    vendor: Option<&VendorSurvey>,
    quotation: Option<&DocumentProbe>,
    comparison: ComparisonResult,
    generated: NaiveDateTime,
) -> PricingReport {
    PricingReport {
        timestamp: generated,
        current_pricing_summary: current.map(PricingSummary::from_model),
        new_pricing_summary: vendor.map(VendorSummary::from_survey),
        quotation: quotation.cloned(),
        comparison,
    }
}
