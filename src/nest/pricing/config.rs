use std::path::{Path, PathBuf};

use crate::nest::pricing::emit::{REPORT_FILE, TEMPLATE_FILE};
use crate::nest::pricing::layout::{CURRENT_WORKBOOK, PRICING_SHEET};
use crate::nest::pricing::survey::{VENDOR_DOCUMENT, VENDOR_WORKBOOK};

/// Input and output locations of one pipeline run. Relative paths are
/// resolved against `workdir`.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub workdir: PathBuf,
    pub current_workbook: PathBuf,
    pub pricing_sheet: String,
    pub vendor_workbook: PathBuf,
    pub vendor_document: PathBuf,
    pub template_out: PathBuf,
    pub report_out: PathBuf,
    /// Optional spreadsheet rendition of the template.
    pub template_xlsx: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            current_workbook: PathBuf::from(CURRENT_WORKBOOK),
            pricing_sheet: PRICING_SHEET.to_string(),
            vendor_workbook: PathBuf::from(VENDOR_WORKBOOK),
            vendor_document: PathBuf::from(VENDOR_DOCUMENT),
            template_out: PathBuf::from(TEMPLATE_FILE),
            report_out: PathBuf::from(REPORT_FILE),
            template_xlsx: None,
        }
    }
}

impl Settings {
    /// Default settings rooted at `workdir`.
    pub fn in_dir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            ..Self::default()
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.workdir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_ignore_workdir() {
        let settings = Settings::in_dir("/data/pricing");
        assert_eq!(
            settings.resolve(&settings.current_workbook),
            PathBuf::from("/data/pricing/Preiskalkulation.xlsx")
        );
        assert_eq!(
            settings.resolve(Path::new("/tmp/out.json")),
            PathBuf::from("/tmp/out.json")
        );
    }
}
