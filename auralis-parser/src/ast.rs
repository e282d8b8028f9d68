use auralis_common::schema::data_type::SchemaTable;

pub use auralis_common::predicate::Sign;

/// `(target_column, sign, value)`. `value` begins life as the raw token
/// string; the executor converts it to the target column's type before
/// evaluation (§4.3/§4.5).
#[derive(Clone, Debug)]
pub struct Condition {
    pub target_column: String,
    pub sign: Sign,
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct SelectQuery {
    pub source: SchemaTable,
    pub columns: Vec<String>,
    pub conditions: Vec<Condition>,
}

#[derive(Clone, Debug)]
pub struct InsertQuery {
    pub source: SchemaTable,
    /// Empty when the statement supplied no explicit column list; in that
    /// case values are assumed to already be in declared column order.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// `(name, type, attrs)` — an ordered sequence, not a map, so `position` can
/// be assigned deterministically from declaration order.
#[derive(Clone, Debug)]
pub struct CreateTableQuery {
    pub source: SchemaTable,
    pub columns: Vec<(String, String, Vec<String>)>,
}

/// The tagged query value the parser produces and the executor dispatches
/// on.
#[derive(Clone, Debug)]
pub enum Query {
    Select(SelectQuery),
    Insert(InsertQuery),
    CreateTable(CreateTableQuery),
}
