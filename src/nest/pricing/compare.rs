use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::nest::pricing::model::{PricingModel, VendorSurvey};

/// Why a [`ComparisonResult`] carries no changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    /// The current model or the vendor survey was unavailable.
    IncompleteInputs,
    /// Both inputs were present but the vendor data has no normalised model to
    /// diff against yet.
    AwaitingVendorModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub status: ComparisonStatus,
    pub summary: BTreeMap<String, Value>,
    pub changes: Vec<Value>,
    pub recommendations: Vec<String>,
}

impl ComparisonResult {
    fn empty(status: ComparisonStatus) -> Self {
        Self {
            status,
            summary: BTreeMap::new(),
            changes: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// Compares the current pricing against the vendor data.
///
/// The vendor survey is a structural inventory rather than a priced model, so
/// no differences are computed; the returned status states which of the two
/// empty outcomes applies. A price diff belongs here once the vendor workbook
/// is normalised into a [`PricingModel`].
pub fn compare(current: Option<&PricingModel>, vendor: Option<&VendorSurvey>) -> ComparisonResult {
    match (current, vendor) {
        (Some(_), Some(_)) => {
            info!("comparison pending a normalised vendor model");
            ComparisonResult::empty(ComparisonStatus::AwaitingVendorModel)
        }
        _ => {
            warn!(
                current = current.is_some(),
                vendor = vendor.is_some(),
                "missing pricing data; comparison skipped"
            );
            ComparisonResult::empty(ComparisonStatus::IncompleteInputs)
        }
    }
}
