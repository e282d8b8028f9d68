pub mod config;
pub mod dataset;
pub mod err;
pub mod log;
pub mod predicate;
pub mod pretty_util;
pub mod schema;
pub mod value;

pub use dataset::DataSet;
pub use predicate::{Predicate, Sign};
