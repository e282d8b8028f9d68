use std::fmt;
use std::fmt::Display;
use std::io;

/// Every failure in the engine surfaces as one of these. Each variant carries
/// a human message; `code()` gives the stable string used by the CLI and by
/// tests that assert on failure kind rather than message text.
#[derive(Debug)]
pub enum AuralisError {
    /// Empty token stream after lexing.
    InvalidQuery(String),
    /// No keyword token found at the start of a query.
    MissingKeyword(String),
    /// Data file missing for a referenced table.
    TableNotFound(String),
    /// No catalog entry for a referenced table.
    TableDescriptorNotFound(String),
    /// A literal could not be converted to the target column type.
    TypeConversion(String),
    /// Missing columns, missing FROM/INTO/VALUES, missing source table,
    /// empty column spec, unsupported OR.
    ParseError(String),
    /// Wraps an underlying filesystem failure.
    Io(io::Error),
    /// An internal invariant was violated. Never raised for data-dependent
    /// input; only truly unreachable branches report this.
    Bug(String),
}

impl AuralisError {
    /// Stable code, independent of the human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            AuralisError::InvalidQuery(_) => "INVALID_QUERY",
            AuralisError::MissingKeyword(_) => "MISSING_KEYWORD",
            AuralisError::TableNotFound(_) => "TABLE_NOT_FOUND",
            AuralisError::TableDescriptorNotFound(_) => "TABLE_DESCRIPTOR_NOT_FOUND",
            AuralisError::TypeConversion(_) => "TYPE_CONV_ERROR",
            AuralisError::ParseError(_) => "PARSE_ERROR",
            AuralisError::Io(_) => "IO_ERROR",
            AuralisError::Bug(_) => "BUG",
        }
    }
}

impl Display for AuralisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuralisError::InvalidQuery(s)
            | AuralisError::MissingKeyword(s)
            | AuralisError::TableNotFound(s)
            | AuralisError::TableDescriptorNotFound(s)
            | AuralisError::TypeConversion(s)
            | AuralisError::ParseError(s)
            | AuralisError::Bug(s) => {
                write!(f, "[{}] {}", self.code(), s)
            }
            AuralisError::Io(err) => {
                write!(f, "[{}] {}", self.code(), err)
            }
        }
    }
}

impl std::error::Error for AuralisError {}

impl From<io::Error> for AuralisError {
    fn from(error: io::Error) -> Self {
        AuralisError::Io(error)
    }
}
