use std::path::Path;

use crate::error::EvalError;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// On-disk layout of a dataset or result file, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    /// Spreadsheet workbook; the first worksheet holds the table
    Workbook,
}

impl TableFormat {
    /// Unknown or missing extensions are treated as CSV.
    pub fn from_path(path: &Path) -> Self {
        match extension(path) {
            Some(ext) if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) => TableFormat::Workbook,
            _ => TableFormat::Csv,
        }
    }

    /// Like [`TableFormat::from_path`], but workbooks can only be written
    /// as `.xlsx`.
    pub fn for_output(path: &Path) -> Result<Self, EvalError> {
        match Self::from_path(path) {
            TableFormat::Workbook if extension(path).as_deref() != Some("xlsx") => {
                Err(EvalError::InvalidConfig(format!(
                    "cannot write {}: spreadsheets are written as .xlsx",
                    path.display()
                )))
            }
            format => Ok(format),
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()?.to_str().map(str::to_ascii_lowercase)
}
