use auralis_common::err::decode_error::AuralisError;
use auralis_common::schema::data_type::{DataType, SchemaTable};
use auralis_common::schema::table::Table;

/// Encodes a table descriptor in the legacy flat-file format (§4.7):
/// `schema.name|col1.type|col2.type|...\n`. Predates the self-describing
/// catalog (§4.6); the executor and catalog never read or write this
/// format during normal operation — it exists only for round-trip tests.
pub fn encode_table_descriptor(table: &Table) -> String {
    let mut fields = vec![table.schema_table.to_string()];
    fields.extend(
        table
            .columns
            .iter()
            .map(|c| format!("{}.{}", c.name, c.data_type.as_str())),
    );
    format!("{}\n", fields.join("|"))
}

/// Parses one legacy descriptor line back into its `(SchemaTable,
/// Vec<(name, type)>)` parts, the inverse of [`encode_table_descriptor`]
/// on well-formed input (P7).
pub fn parse_table_descriptor(
    line: &str,
) -> Result<(SchemaTable, Vec<(String, DataType)>), AuralisError> {
    let line = line.trim_end_matches('\n');
    let mut fields = line.split('|');

    let table_ref = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuralisError::ParseError("legacy descriptor: missing table reference".into()))?;
    let schema_table = SchemaTable::try_from(table_ref)?;

    let mut columns = Vec::new();
    for field in fields {
        let mut parts = field.splitn(2, '.');
        let name = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AuralisError::ParseError("legacy descriptor: missing column name".into()))?;
        let type_name = parts
            .next()
            .ok_or_else(|| AuralisError::ParseError("legacy descriptor: missing column type".into()))?;
        columns.push((name.to_string(), DataType::try_from(type_name)?));
    }

    if columns.is_empty() {
        return Err(AuralisError::ParseError(
            "legacy descriptor: no columns".into(),
        ));
    }

    Ok((schema_table, columns))
}

#[cfg(test)]
mod test {
    use auralis_common::schema::table::Column;

    use super::*;

    #[test]
    fn encode_then_parse_round_trips() {
        let table = Table::new(
            SchemaTable::new("dbo", "users"),
            vec![
                Column::new("id", DataType::UniqueIdentifier, 1),
                Column::new("name", DataType::Varchar, 2),
                Column::new("age", DataType::SmallInt, 3),
            ],
        );

        let encoded = encode_table_descriptor(&table);
        assert_eq!("dbo.users|id.uniqueidentifier|name.varchar|age.smallint\n", encoded);

        let (schema_table, columns) = parse_table_descriptor(&encoded).unwrap();
        assert_eq!(table.schema_table, schema_table);
        assert_eq!(
            vec![
                ("id".to_string(), DataType::UniqueIdentifier),
                ("name".to_string(), DataType::Varchar),
                ("age".to_string(), DataType::SmallInt),
            ],
            columns
        );
    }

    #[test]
    fn parse_rejects_missing_columns() {
        assert!(parse_table_descriptor("dbo.users\n").is_err());
    }

    #[test]
    fn parse_rejects_malformed_table_reference() {
        assert!(parse_table_descriptor("a.b.c|id.smallint\n").is_err());
    }
}
