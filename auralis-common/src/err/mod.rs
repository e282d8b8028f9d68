pub mod decode_error;

pub use decode_error::AuralisError;

pub type CResult<T> = Result<T, AuralisError>;
