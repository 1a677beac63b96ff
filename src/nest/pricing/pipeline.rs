use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{error, info, instrument};

use crate::nest::pricing::build;
use crate::nest::pricing::compare::{self, ComparisonResult};
use crate::nest::pricing::config::Settings;
use crate::nest::pricing::emit::{self, PricingReport, PricingTemplate};
use crate::nest::pricing::error::Result;
use crate::nest::pricing::io::{excel_write, json};
use crate::nest::pricing::model::{DocumentProbe, PricingModel, VendorSurvey};
use crate::nest::pricing::survey;

/// Everything a run produced. Stages that failed leave their slot empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutcome {
    pub current: Option<PricingModel>,
    pub vendor: Option<VendorSurvey>,
    pub quotation: Option<DocumentProbe>,
    pub comparison: ComparisonResult,
    pub template: PricingTemplate,
    pub report: PricingReport,
    /// Output files that were written successfully.
    pub written: Vec<PathBuf>,
}

/// Runs the full analysis stamped with the current local time.
pub fn run(settings: &Settings) -> PipelineOutcome {
    run_at(settings, Local::now().naive_local())
}

/// Runs every stage in order. Failures are logged at the stage that hit them
/// and never abort the run; the outputs are always attempted.
#[instrument(level = "info", skip_all, fields(workdir = %settings.workdir.display()))]
pub fn run_at(settings: &Settings, now: NaiveDateTime) -> PipelineOutcome {
    let current = build::load_current_pricing(
        &settings.resolve(&settings.current_workbook),
        &settings.pricing_sheet,
    );
    let vendor = survey::survey_vendor_workbook(&settings.resolve(&settings.vendor_workbook));
    let quotation = survey::probe_quotation(&settings.resolve(&settings.vendor_document));

    let comparison = compare::compare(current.as_ref(), vendor.as_ref());
    let template = emit::build_template(current.as_ref(), now);
    let report = emit::build_report(
        current.as_ref(),
        vendor.as_ref(),
        quotation.as_ref(),
        comparison.clone(),
        now,
    );

    let mut written = Vec::new();
    written.extend(persist(
        "template",
        &settings.resolve(&settings.template_out),
        |path| json::write_json(path, &template),
    ));
    if let Some(xlsx) = &settings.template_xlsx {
        written.extend(persist("template workbook", &settings.resolve(xlsx), |path| {
            excel_write::write_template(path, &template)
        }));
    }
    written.extend(persist(
        "report",
        &settings.resolve(&settings.report_out),
        |path| json::write_json(path, &report),
    ));

    PipelineOutcome {
        current,
        vendor,
        quotation,
        comparison,
        template,
        report,
        written,
    }
}

fn persist(kind: &str, path: &Path, write: impl FnOnce(&Path) -> Result<()>) -> Option<PathBuf> {
    match write(path) {
        Ok(()) => {
            info!(output = %path.display(), "{kind} written");
            Some(path.to_path_buf())
        }
        Err(err) => {
            error!(output = %path.display(), error = %err, "failed to write {kind}");
            None
        }
    }
}
