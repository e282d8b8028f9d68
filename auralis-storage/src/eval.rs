use auralis_common::err::decode_error::AuralisError;
use auralis_common::predicate::Sign;
use auralis_common::schema::data_type::DataType;
use auralis_common::value::Value;

/// Evaluates one predicate against a decoded cell value. §4.5: integer
/// types support all six operators; `varchar`/`boolean` support only `=`
/// and `!=`; `uniqueidentifier` supports none and is a query error to even
/// attempt, caught earlier by [`ensure_comparable`].
pub fn evaluate(actual: &Value, sign: Sign, expected: &Value) -> Result<bool, AuralisError> {
    match (actual, expected) {
        (Value::SmallInt(a), Value::SmallInt(b)) => Ok(compare_ord(a, sign, b)),
        (Value::Integer(a), Value::Integer(b)) => Ok(compare_ord(a, sign, b)),
        (Value::BigInt(a), Value::BigInt(b)) => Ok(compare_ord(a, sign, b)),
        (Value::Varchar(a), Value::Varchar(b)) => compare_eq_only(a, sign, b),
        (Value::Boolean(a), Value::Boolean(b)) => compare_eq_only(a, sign, b),
        (Value::UniqueIdentifier(_), Value::UniqueIdentifier(_)) => Err(AuralisError::TypeConversion(
            "uniqueidentifier predicates are not supported".into(),
        )),
        _ => Err(AuralisError::Bug(
            "eval: predicate value type does not match column type".into(),
        )),
    }
}

/// Surfaces the uuid-predicate restriction as a query error before a scan
/// begins, rather than mid-scan on the first row that happens to carry one.
pub fn ensure_comparable(data_type: DataType) -> Result<(), AuralisError> {
    if data_type == DataType::UniqueIdentifier {
        Err(AuralisError::TypeConversion(
            "uniqueidentifier predicates are not supported".into(),
        ))
    } else {
        Ok(())
    }
}

fn compare_ord<T: PartialOrd + PartialEq>(a: &T, sign: Sign, b: &T) -> bool {
    match sign {
        Sign::Eq => a == b,
        Sign::Neq => a != b,
        Sign::Lt => a < b,
        Sign::Lte => a <= b,
        Sign::Gt => a > b,
        Sign::Gte => a >= b,
    }
}

fn compare_eq_only<T: PartialEq>(a: &T, sign: Sign, b: &T) -> Result<bool, AuralisError> {
    match sign {
        Sign::Eq => Ok(a == b),
        Sign::Neq => Ok(a != b),
        other => Err(AuralisError::TypeConversion(format!(
            "operator {:?} is not supported for this column type", other
        ))),
    }
}
