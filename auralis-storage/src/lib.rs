pub mod catalog;
pub mod codec;
pub mod eval;
pub mod file;
pub mod legacy;

pub use catalog::{add_table, bootstrap, get_table};
pub use file::{create_table_file, read_from_table, write_into_table};
