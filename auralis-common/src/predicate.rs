use crate::value::Value;

/// Comparison operator of a `WHERE` predicate. Shared between the parser's
/// AST (where the right-hand side is still a raw literal string) and the
/// storage layer's typed scan predicates (where it has been converted).
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum Sign {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

/// A single typed predicate evaluated during a table scan: `target_column
/// sign value`. Conditions are carried as an explicit `Vec<Predicate>` and
/// evaluated conjunctively, short-circuiting on the first failing
/// predicate for a given row (§3 Condition, §9 redesign).
#[derive(Clone, Debug)]
pub struct Predicate {
    pub column: String,
    pub sign: Sign,
    pub value: Value,
}

impl Predicate {
    pub fn new(column: impl Into<String>, sign: Sign, value: Value) -> Self {
        Predicate {
            column: column.into(),
            sign,
            value,
        }
    }
}
