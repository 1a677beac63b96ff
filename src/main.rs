use std::path::PathBuf;

use clap::Parser;
use nest_pricing::config::Settings;
use nest_pricing::emit::{REPORT_FILE, TEMPLATE_FILE};
use nest_pricing::layout::{CURRENT_WORKBOOK, PRICING_SHEET};
use nest_pricing::survey::{VENDOR_DOCUMENT, VENDOR_WORKBOOK};
use nest_pricing::{logging, pipeline};
use tracing::info;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init_tracing(cli.verbose) {
        eprintln!("warning: {error}");
    }

    // Stage failures are logged by the pipeline; the exit status stays 0.
    let outcome = pipeline::run(&cli.into_settings());
    info!(
        outputs = outcome.written.len(),
        status = ?outcome.comparison.status,
        "pricing analysis finished"
    );
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reconcile configurator pricing against vendor quotation files."
)]
struct Cli {
    /// Directory relative paths are resolved against.
    #[arg(long, default_value = ".")]
    workdir: PathBuf,

    /// Workbook holding the current configurator pricing.
    #[arg(long, default_value = CURRENT_WORKBOOK)]
    current: PathBuf,

    /// Sheet of the current workbook to read.
    #[arg(long, default_value = PRICING_SHEET)]
    sheet: String,

    /// Vendor calculation workbook to survey.
    #[arg(long, default_value = VENDOR_WORKBOOK)]
    vendor_workbook: PathBuf,

    /// Vendor quotation document.
    #[arg(long, default_value = VENDOR_DOCUMENT)]
    vendor_document: PathBuf,

    /// Output path of the import template.
    #[arg(long, default_value = TEMPLATE_FILE)]
    template_out: PathBuf,

    /// Output path of the comparison report.
    #[arg(long, default_value = REPORT_FILE)]
    report_out: PathBuf,

    /// Also write the template as an Excel workbook.
    #[arg(long)]
    template_xlsx: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_settings(self) -> Settings {
        Settings {
            workdir: self.workdir,
            current_workbook: self.current,
            pricing_sheet: self.sheet,
            vendor_workbook: self.vendor_workbook,
            vendor_document: self.vendor_document,
            template_out: self.template_out,
            report_out: self.report_out,
            template_xlsx: self.template_xlsx,
        }
    }
}
