use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use csv::{ReaderBuilder, StringRecord};

use super::columns::{Columns, ANSWER_COLUMN, EXPECTED_COLUMN, INPUT_COLUMN};
use super::format::TableFormat;
use crate::error::EvalError;

/// An input dataset loaded in full, one entry per data record.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Columns,
    rows: Vec<DatasetRow>,
}

/// One data record. Records the reader could not decode keep their error
/// so the batch loop can report them against the right index.
#[derive(Debug, Clone)]
pub struct DatasetRow {
    index: usize,
    fields: Result<RowFields, String>,
}

#[derive(Debug, Clone)]
struct RowFields {
    input: Option<String>,
    expected: Option<String>,
    answer: Option<String>,
}

impl Dataset {
    /// Loads a CSV file or the first worksheet of a workbook, depending on
    /// the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EvalError> {
        let path = path.as_ref();
        let format = TableFormat::from_path(path);
        log::debug!("Loading {format:?} dataset from {}", path.display());
        match format {
            TableFormat::Csv => Self::from_reader(File::open(path)?),
            TableFormat::Workbook => Self::from_workbook(path),
        }
    }

    fn from_workbook(path: &Path) -> Result<Self, EvalError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook.worksheet_range_at(0).ok_or_else(|| {
            EvalError::Dataset(format!("{} has no worksheets", path.display()))
        })??;
        let mut records = range.rows();
        let header = records
            .next()
            .ok_or_else(|| EvalError::MissingColumn(INPUT_COLUMN.to_string()))?;
        let columns = Columns::from_headers(header.iter().map(|cell| cell.to_string()))?;

        let rows: Vec<DatasetRow> = records
            .enumerate()
            .map(|(index, cells)| DatasetRow {
                index,
                fields: RowFields::from_cells(cells, &columns),
            })
            .collect();
        log::debug!("Dataset has {} rows", rows.len());
        Ok(Self { columns, rows })
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EvalError> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let columns = Columns::from_headers(reader.headers()?)?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let fields = match record {
                Ok(record) => Ok(RowFields::extract(&record, &columns)),
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => Err(err.to_string()),
            };
            rows.push(DatasetRow { index, fields });
        }
        log::debug!("Dataset has {} rows", rows.len());
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RowFields {
    fn extract(record: &StringRecord, columns: &Columns) -> Self {
        let cell = |pos: usize| record.get(pos).map(str::to_string);
        Self {
            input: cell(columns.input),
            expected: cell(columns.expected),
            answer: columns.answer.and_then(cell),
        }
    }

    /// Empty worksheet cells count as missing.
    fn from_cells(cells: &[Data], columns: &Columns) -> Result<Self, String> {
        let cell = |pos: usize| cells.get(pos).map(cell_text).transpose().map(Option::flatten);
        Ok(Self {
            input: cell(columns.input)?,
            expected: cell(columns.expected)?,
            answer: match columns.answer {
                Some(pos) => cell(pos)?,
                None => None,
            },
        })
    }
}

fn cell_text(cell: &Data) -> Result<Option<String>, String> {
    Ok(match cell {
        Data::Empty => None,
        Data::String(text) => Some(text.clone()),
        // Spreadsheets store whole numbers as floats
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            Some(format!("{}", *value as i64))
        }
        Data::Bool(true) => Some("True".to_string()),
        Data::Bool(false) => Some("False".to_string()),
        Data::Error(err) => return Err(format!("cell holds error {err}")),
        other => Some(other.to_string()),
    })
}

impl DatasetRow {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn input(&self) -> Result<&str, EvalError> {
        self.field(INPUT_COLUMN, |f| f.input.as_deref())
    }

    pub fn expected(&self) -> Result<&str, EvalError> {
        self.field(EXPECTED_COLUMN, |f| f.expected.as_deref())
    }

    pub fn answer(&self) -> Result<&str, EvalError> {
        self.field(ANSWER_COLUMN, |f| f.answer.as_deref())
    }

    fn field<'a>(
        &'a self,
        name: &str,
        pick: impl FnOnce(&'a RowFields) -> Option<&'a str>,
    ) -> Result<&'a str, EvalError> {
        let fields = self.fields.as_ref().map_err(|message| EvalError::RowParse {
            row: self.index,
            message: message.clone(),
        })?;
        pick(fields).ok_or_else(|| EvalError::RowParse {
            row: self.index,
            message: format!("missing `{name}` cell"),
        })
    }
}
