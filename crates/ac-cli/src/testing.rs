//! Test doubles shared by command tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use ac_sheets::{FetchError, Row, RowSource};
use async_trait::async_trait;

/// Replays a fixed sequence of fetch results, then fails.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Row>, FetchError>>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Vec<Row>, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl RowSource for ScriptedSource {
    async fn fetch_rows(&self) -> Result<Vec<Row>, FetchError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::InvalidResponse("script exhausted".to_string())))
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// Builds a sheet row from `(column, value)` literals.
pub fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(column, value)| ((*column).to_string(), (*value).to_string()))
        .collect()
}
