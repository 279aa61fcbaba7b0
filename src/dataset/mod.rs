//! Tabular input and output.
//!
//! Datasets are CSV files or spreadsheet workbooks with a header row;
//! columns are found by name. Result files mirror the input columns and
//! add the score columns.

mod columns;
mod format;
mod literal;
mod reader;
mod writer;

pub use columns::{
    Columns, ANSWER_COLUMN, EXPECTED_COLUMN, INPUT_COLUMN, LCS_SCORE_COLUMN, ROUGE_SCORE_COLUMN,
    SCORE_COLUMN,
};
pub use format::TableFormat;
pub use literal::{parse_literal, LiteralError, LiteralValue};
pub use reader::{Dataset, DatasetRow};
pub use writer::{output_headers, write_results, write_results_to_path};
