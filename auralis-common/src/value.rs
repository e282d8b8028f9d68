use serde::Serialize;
use uuid::Uuid;

use crate::err::decode_error::AuralisError;
use crate::schema::data_type::DataType;

/// A single typed cell value. Decode, predicate evaluation, and encode are
/// all exhaustive matches over this sum rather than operating on an untyped
/// container.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Value {
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    Varchar(String),
    UniqueIdentifier(Uuid),
    Boolean(bool),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::SmallInt(_) => DataType::SmallInt,
            Value::Integer(_) => DataType::Integer,
            Value::BigInt(_) => DataType::BigInt,
            Value::Varchar(_) => DataType::Varchar,
            Value::UniqueIdentifier(_) => DataType::UniqueIdentifier,
            Value::Boolean(_) => DataType::Boolean,
        }
    }
}

/// Strips a single leading and trailing `'` from a raw literal token, if
/// both are present. Used before converting a `varchar` literal.
fn strip_quotes(raw: &str) -> &str {
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

/// Converts a raw literal token into a typed `Value` for the given target
/// column type. `varchar` truncation, if any, happens later at encode time
/// (§4.3/§4.4) — this step only parses, it never truncates.
pub fn convert(target: DataType, raw: &str) -> Result<Value, AuralisError> {
    match target {
        DataType::SmallInt => raw
            .parse::<i16>()
            .map(Value::SmallInt)
            .map_err(|_| AuralisError::TypeConversion(format!("smallint conversion error: {}", raw))),
        DataType::Integer => raw
            .parse::<i32>()
            .map(Value::Integer)
            .map_err(|_| AuralisError::TypeConversion(format!("integer conversion error: {}", raw))),
        DataType::BigInt => raw
            .parse::<i64>()
            .map(Value::BigInt)
            .map_err(|_| AuralisError::TypeConversion(format!("bigint conversion error: {}", raw))),
        DataType::Varchar => Ok(Value::Varchar(strip_quotes(raw).to_string())),
        DataType::UniqueIdentifier => Uuid::parse_str(strip_quotes(raw))
            .map(Value::UniqueIdentifier)
            .map_err(|_| AuralisError::TypeConversion(format!("uuid conversion error: {}", raw))),
        DataType::Boolean => {
            let s = strip_quotes(raw);
            if s.eq_ignore_ascii_case("true") || s == "1" {
                Ok(Value::Boolean(true))
            } else if s.eq_ignore_ascii_case("false") || s == "0" {
                Ok(Value::Boolean(false))
            } else {
                Err(AuralisError::TypeConversion(format!(
                    "boolean conversion error: {}", raw
                )))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn smallint_boundary_values() {
        assert_eq!(Value::SmallInt(32767), convert(DataType::SmallInt, "32767").unwrap());
        assert_eq!(Value::SmallInt(-32768), convert(DataType::SmallInt, "-32768").unwrap());
        assert!(convert(DataType::SmallInt, "32768").is_err());
    }

    #[test]
    fn integer_boundary_values() {
        assert_eq!(
            Value::Integer(i32::MAX),
            convert(DataType::Integer, &i32::MAX.to_string()).unwrap()
        );
        assert!(convert(DataType::Integer, "2147483648").is_err());
    }

    #[test]
    fn bigint_boundary_values() {
        assert_eq!(
            Value::BigInt(i64::MIN),
            convert(DataType::BigInt, &i64::MIN.to_string()).unwrap()
        );
    }

    #[test]
    fn varchar_strips_surrounding_quotes() {
        assert_eq!(
            Value::Varchar("alice".into()),
            convert(DataType::Varchar, "'alice'").unwrap()
        );
    }

    #[test]
    fn varchar_without_quotes_passes_through() {
        assert_eq!(
            Value::Varchar("alice".into()),
            convert(DataType::Varchar, "alice").unwrap()
        );
    }

    #[test]
    fn uuid_parses_canonical_form() {
        let raw = "'92bd41cc-62b5-41c9-b542-f9737941407a'";
        let v = convert(DataType::UniqueIdentifier, raw).unwrap();
        assert!(matches!(v, Value::UniqueIdentifier(_)));
    }

    #[test]
    fn uuid_rejects_malformed_input() {
        assert!(convert(DataType::UniqueIdentifier, "'not-a-uuid'").is_err());
    }

    #[test]
    fn boolean_accepts_true_false_and_digits() {
        assert_eq!(Value::Boolean(true), convert(DataType::Boolean, "true").unwrap());
        assert_eq!(Value::Boolean(true), convert(DataType::Boolean, "1").unwrap());
        assert_eq!(Value::Boolean(false), convert(DataType::Boolean, "FALSE").unwrap());
        assert_eq!(Value::Boolean(false), convert(DataType::Boolean, "0").unwrap());
        assert!(convert(DataType::Boolean, "yes").is_err());
    }
}
