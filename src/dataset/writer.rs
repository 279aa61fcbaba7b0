use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use rust_xlsxwriter::Workbook;

use super::columns::{
    ANSWER_COLUMN, EXPECTED_COLUMN, INPUT_COLUMN, LCS_SCORE_COLUMN, ROUGE_SCORE_COLUMN,
    SCORE_COLUMN,
};
use super::format::TableFormat;
use crate::error::EvalError;
use crate::evaluator::{EvaluationRow, Mode, ResultCollection};

/// Header row of the output file for `mode`.
pub fn output_headers(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Precomputed => &[INPUT_COLUMN, EXPECTED_COLUMN, ANSWER_COLUMN, SCORE_COLUMN],
        Mode::Remote => &[
            INPUT_COLUMN,
            EXPECTED_COLUMN,
            ANSWER_COLUMN,
            LCS_SCORE_COLUMN,
            ROUGE_SCORE_COLUMN,
        ],
    }
}

/// Writes one line per scored row, in collection order.
pub fn write_results<W: Write>(
    writer: W,
    results: &ResultCollection,
    mode: Mode,
) -> Result<(), EvalError> {
    let mut out = Writer::from_writer(writer);
    out.write_record(output_headers(mode))?;
    for row in results {
        out.write_record(&record(row, mode)?)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes CSV, or an `.xlsx` workbook when the path says so.
pub fn write_results_to_path(
    path: impl AsRef<Path>,
    results: &ResultCollection,
    mode: Mode,
) -> Result<(), EvalError> {
    let path = path.as_ref();
    match TableFormat::for_output(path)? {
        TableFormat::Csv => write_results(File::create(path)?, results, mode)?,
        TableFormat::Workbook => write_workbook(path, results, mode)?,
    }
    log::info!("wrote {} rows to {}", results.len(), path.display());
    Ok(())
}

/// Scores are written as numbers, everything else as text.
fn write_workbook(path: &Path, results: &ResultCollection, mode: Mode) -> Result<(), EvalError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in (0u16..).zip(output_headers(mode)) {
        sheet.write_string(0, col, *header)?;
    }
    for (line, row) in (1u32..).zip(results) {
        sheet.write_string(line, 0, row.input())?;
        sheet.write_string(line, 1, row.expected())?;
        sheet.write_string(line, 2, row.actual())?;
        if let Some(lcs) = row.lcs() {
            sheet.write_number(line, 3, lcs)?;
        }
        if mode == Mode::Remote {
            if let Some(scores) = row.rouge() {
                sheet.write_string(line, 4, serde_json::to_string(&scores)?)?;
            }
        }
    }
    workbook.save(path)?;
    Ok(())
}

fn record(row: &EvaluationRow, mode: Mode) -> Result<Vec<String>, EvalError> {
    let mut cells = vec![
        row.input().to_string(),
        row.expected().to_string(),
        row.actual().to_string(),
        row.lcs().map(|lcs| format!("{lcs:.2}")).unwrap_or_default(),
    ];
    if mode == Mode::Remote {
        let rouge = match row.rouge() {
            Some(scores) => serde_json::to_string(&scores)?,
            None => String::new(),
        };
        cells.push(rouge);
    }
    Ok(cells)
}
