// src/process/table.rs

use crate::error::{RateError, Result};
use arrow::{
    array::{AsArray, StringArray},
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{fs, io::Cursor, path::Path, sync::Arc};
use tracing::debug;

/// Rows read from the source CSV, every column held as text.
///
/// The schema is fixed when the table is built and the batch is never mutated;
/// numeric coercion happens in the consumers.
#[derive(Debug, Clone)]
pub struct SourceTable {
    batch: RecordBatch,
}

impl SourceTable {
    /// Read a comma-separated file with a header row.
    #[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RateError::InputNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let table = Self::from_csv_str(&content)?;
        debug!(
            rows = table.num_rows(),
            columns = table.column_names().len(),
            "loaded source table"
        );
        Ok(table)
    }

    /// Parse CSV text whose first line names the columns.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let content = content.trim_start_matches('\u{feff}');
        if content.trim().is_empty() {
            return Ok(Self {
                batch: RecordBatch::new_empty(Arc::new(Schema::empty())),
            });
        }

        // Header names only; quoted names may contain the delimiter.
        let format = Format::default()
            .with_header(true)
            .with_quote(b'"')
            .with_delimiter(b',');
        let (inferred, _) = format.infer_schema(Cursor::new(content.as_bytes()), Some(0))?;

        // Parse everything as Utf8 so malformed cells survive to the coercion step.
        let fields: Vec<Field> = inferred
            .fields()
            .iter()
            .map(|f| Field::new(f.name().trim(), DataType::Utf8, true))
            .collect();
        let schema = Arc::new(Schema::new(fields));

        let reader = ReaderBuilder::new(schema.clone())
            .with_format(format)
            .build(Cursor::new(content.as_bytes()))?;
        let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
        let batch = concat_batches(&schema, &batches)?;

        Ok(Self { batch })
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.batch.schema_ref().index_of(name).is_ok()
    }

    /// Text values of column `name`; `MissingColumn` if absent.
    pub fn text_column(&self, name: &str) -> Result<&StringArray> {
        let column = self
            .batch
            .column_by_name(name)
            .ok_or_else(|| RateError::missing_column(name, "source table"))?;
        // every column is built as Utf8
        Ok(column.as_string::<i32>())
    }
}
