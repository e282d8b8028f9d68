use byteorder::{BigEndian, ByteOrder};
use uuid::Uuid;

use auralis_common::err::decode_error::AuralisError;
use auralis_common::schema::data_type::DataType;
use auralis_common::value::Value;

/// Byte appended after every row's encoded cells. Decorative: row length is
/// computed from column widths, never delimiter-searched (§9).
pub const ROW_TERMINATOR: u8 = 10;

/// Encodes one typed cell to its fixed-width on-disk representation.
/// `varchar_width` is only consulted for `Value::Varchar`; longer strings
/// are silently truncated at the byte level (§4.4, §9 open question).
pub fn encode_cell(value: &Value, varchar_width: usize) -> Result<Vec<u8>, AuralisError> {
    match value {
        Value::SmallInt(v) => {
            let mut buf = vec![0u8; 2];
            BigEndian::write_i16(&mut buf, *v);
            Ok(buf)
        }
        Value::Integer(v) => {
            let mut buf = vec![0u8; 4];
            BigEndian::write_i32(&mut buf, *v);
            Ok(buf)
        }
        Value::BigInt(v) => {
            let mut buf = vec![0u8; 8];
            BigEndian::write_i64(&mut buf, *v);
            Ok(buf)
        }
        Value::Varchar(s) => {
            let mut buf = vec![0u8; varchar_width];
            let bytes = s.as_bytes();
            let n = bytes.len().min(varchar_width);
            buf[..n].copy_from_slice(&bytes[..n]);
            Ok(buf)
        }
        Value::UniqueIdentifier(u) => Ok(u.as_bytes().to_vec()),
        Value::Boolean(b) => Ok(vec![if *b { 1 } else { 0 }]),
    }
}

/// Decodes one fixed-width cell back into a typed `Value`. `bytes` must be
/// exactly `data_type.byte_width(varchar_width)` long.
pub fn decode_cell(
    data_type: DataType,
    bytes: &[u8],
    varchar_width: usize,
) -> Result<Value, AuralisError> {
    let expected = data_type.byte_width(varchar_width);
    if bytes.len() != expected {
        return Err(AuralisError::Bug(format!(
            "codec: expected {} bytes for {}, got {}",
            expected,
            data_type,
            bytes.len()
        )));
    }

    match data_type {
        DataType::SmallInt => Ok(Value::SmallInt(BigEndian::read_i16(bytes))),
        DataType::Integer => Ok(Value::Integer(BigEndian::read_i32(bytes))),
        DataType::BigInt => Ok(Value::BigInt(BigEndian::read_i64(bytes))),
        DataType::Varchar => {
            let trimmed = trim_trailing_zeros(bytes);
            let s = String::from_utf8(trimmed.to_vec())
                .map_err(|e| AuralisError::Bug(format!("codec: varchar is not utf8: {}", e)))?;
            Ok(Value::Varchar(s))
        }
        DataType::UniqueIdentifier => Ok(Value::UniqueIdentifier(Uuid::from_slice(bytes).map_err(
            |e| AuralisError::Bug(format!("codec: malformed uuid bytes: {}", e)),
        )?)),
        DataType::Boolean => Ok(Value::Boolean(bytes[0] != 0)),
    }
}

fn trim_trailing_zeros(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map(|p| p + 1).unwrap_or(0);
    &bytes[..end]
}

/// Encodes an entire row — one cell per column, in column order — followed
/// by the row terminator byte.
pub fn encode_row(values: &[Value], varchar_width: usize) -> Result<Vec<u8>, AuralisError> {
    let mut buf = Vec::new();
    for v in values {
        buf.extend(encode_cell(v, varchar_width)?);
    }
    buf.push(ROW_TERMINATOR);
    Ok(buf)
}
