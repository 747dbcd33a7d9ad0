//! Local JSON file row source.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{FetchError, Row, RowSource, cell_text, rows_from_table};

/// Reads rows from a JSON file on every fetch.
///
/// Two layouts are accepted:
/// - an array of objects, one per row, keys in column order
/// - a Sheets `values` export: `{"values": [[header...], [row...], ...]}`
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Records(Vec<Map<String, Value>>),
    Values { values: Vec<Vec<Value>> },
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn parse_document(content: &str) -> Result<Vec<Row>, FetchError> {
    let document: Document = serde_json::from_str(content)
        .map_err(|err| FetchError::InvalidResponse(err.to_string()))?;

    let rows = match document {
        Document::Records(records) => records
            .into_iter()
            .map(|record| {
                record
                    .iter()
                    .map(|(column, value)| (column.clone(), cell_text(value)))
                    .collect::<Row>()
            })
            .collect(),
        Document::Values { values } => rows_from_table(values),
    };
    Ok(rows)
}

#[async_trait]
impl RowSource for JsonFileSource {
    async fn fetch_rows(&self) -> Result<Vec<Row>, FetchError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        let rows = parse_document(&content)?;
        tracing::debug!(rows = rows.len(), path = %self.path.display(), "read rows from file");
        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
