use std::fmt;
use std::hash::{Hash, Hasher};

use crate::err::decode_error::AuralisError;

/// The closed set of column data types. Byte widths are fixed per type and
/// known at compile time, except `Varchar`, whose on-disk width comes from
/// `EngineConfig` rather than being baked in here.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum DataType {
    SmallInt,
    Integer,
    BigInt,
    Varchar,
    UniqueIdentifier,
    Boolean,
}

impl DataType {
    /// On-disk byte width of one cell of this type. `varchar_width` is only
    /// consulted for `Varchar`; every other type ignores it.
    pub fn byte_width(&self, varchar_width: usize) -> usize {
        match self {
            DataType::SmallInt => 2,
            DataType::Integer => 4,
            DataType::BigInt => 8,
            DataType::Varchar => varchar_width,
            DataType::UniqueIdentifier => 16,
            DataType::Boolean => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::SmallInt => "smallint",
            DataType::Integer => "integer",
            DataType::BigInt => "bigint",
            DataType::Varchar => "varchar",
            DataType::UniqueIdentifier => "uniqueidentifier",
            DataType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for DataType {
    type Error = AuralisError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.eq_ignore_ascii_case("smallint") {
            Ok(DataType::SmallInt)
        } else if s.eq_ignore_ascii_case("integer") {
            Ok(DataType::Integer)
        } else if s.eq_ignore_ascii_case("bigint") {
            Ok(DataType::BigInt)
        } else if s.eq_ignore_ascii_case("varchar") {
            Ok(DataType::Varchar)
        } else if s.eq_ignore_ascii_case("uniqueidentifier") {
            Ok(DataType::UniqueIdentifier)
        } else if s.eq_ignore_ascii_case("boolean") {
            Ok(DataType::Boolean)
        } else {
            Err(AuralisError::TypeConversion(format!(
                "unknown data type: {}", s
            )))
        }
    }
}

/// A `(schema, name)` pair uniquely identifying a table. Displays as
/// `schema.name`. A bare name (no dot) defaults to schema `dbo`.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct SchemaTable {
    pub schema: String,
    pub name: String,
}

impl SchemaTable {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        SchemaTable {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SchemaTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

impl Hash for SchemaTable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.schema.as_bytes());
        state.write(self.name.as_bytes());
    }
}

/// `[schema.]name` — a bare name defaults to schema `dbo`.
impl TryFrom<&str> for SchemaTable {
    type Error = AuralisError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let parts: Vec<&str> = value.split('.').collect();
        match parts.len() {
            1 => Ok(SchemaTable::new("dbo", parts[0])),
            2 => Ok(SchemaTable::new(parts[0], parts[1])),
            _ => Err(AuralisError::ParseError(format!(
                "can't resolve table reference: {}", value
            ))),
        }
    }
}
