use thiserror::Error;

use crate::dataset::LiteralError;
use crate::scoring::ScoreError;

/// Error types that can occur while loading a dataset, calling a responder
/// or scoring a row.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A row's required fields are missing or malformed
    #[error("Row parse error: {message}")]
    RowParse { row: usize, message: String },
    /// HTTP transport errors (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// The responder answered with anything but 200 OK
    #[error("Responder returned status {status}: {body}")]
    ResponderStatus { status: u16, body: String },
    /// Response body did not have the expected shape
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
    /// Empty candidate or reference text
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoreError),
    /// A required column is absent from the dataset header
    #[error("Missing required column `{0}`")]
    MissingColumn(String),
    /// The dataset could not be read at all
    #[error("Dataset error: {0}")]
    Dataset(String),
    /// Filesystem errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Settings that cannot produce a runnable evaluation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EvalError {
    /// Whether the error only concerns the row being processed.
    ///
    /// Row-local errors are reported and the batch moves on; everything
    /// else aborts the run.
    pub fn is_row_local(&self) -> bool {
        match self {
            EvalError::RowParse { .. }
            | EvalError::HttpError(_)
            | EvalError::ResponderStatus { .. }
            | EvalError::ResponseFormatError { .. }
            | EvalError::JsonError(_)
            | EvalError::Scoring(_) => true,
            EvalError::MissingColumn(_)
            | EvalError::Dataset(_)
            | EvalError::Io(_)
            | EvalError::InvalidConfig(_) => false,
        }
    }

    pub(crate) fn literal(row: usize, err: LiteralError) -> Self {
        EvalError::RowParse {
            row,
            message: err.to_string(),
        }
    }
}

/// Converts reqwest HTTP errors into EvalErrors
impl From<reqwest::Error> for EvalError {
    fn from(err: reqwest::Error) -> Self {
        EvalError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(err: serde_json::Error) -> Self {
        EvalError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}

impl From<csv::Error> for EvalError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            if let csv::ErrorKind::Io(io) = err.into_kind() {
                return EvalError::Io(io);
            }
            return EvalError::Dataset("unknown IO failure".to_string());
        }
        EvalError::Dataset(err.to_string())
    }
}

impl From<calamine::Error> for EvalError {
    fn from(err: calamine::Error) -> Self {
        match err {
            calamine::Error::Io(io) => EvalError::Io(io),
            other => EvalError::Dataset(other.to_string()),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for EvalError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        EvalError::Dataset(format!("cannot write workbook: {err}"))
    }
}
