pub mod ast;
pub mod parser;

pub use ast::{Condition, CreateTableQuery, InsertQuery, Query, Sign, SelectQuery};
pub use parser::parse_tokens;
