use serde::Serialize;

use crate::value::Value;

/// The in-memory result of a read: the projected column names (in the
/// table's declared order) plus the matching rows, each row holding one
/// cell per projected column in the same order.
#[derive(Clone, Debug, PartialEq, Default, Serialize)]
pub struct DataSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        DataSet { columns, rows }
    }

    pub fn empty(columns: Vec<String>) -> Self {
        DataSet {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
