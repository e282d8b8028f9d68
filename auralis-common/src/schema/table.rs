use crate::schema::data_type::{DataType, SchemaTable};

/// `(name, data_type, position)`. `position` is the 1-based ordinal that
/// defines both declaration order and on-disk byte layout order.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub position: u16,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType, position: u16) -> Self {
        Column {
            name: name.into(),
            data_type,
            position,
        }
    }
}

/// `(schema_table, columns[])`, columns always sorted ascending by
/// `position`.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub schema_table: SchemaTable,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(schema_table: SchemaTable, mut columns: Vec<Column>) -> Self {
        columns.sort_by_key(|c| c.position);
        Table {
            schema_table,
            columns,
        }
    }

    /// Sum of every column's on-disk width plus the row terminator byte
    /// (§3 I1).
    pub fn row_len(&self, varchar_width: usize) -> usize {
        self.columns
            .iter()
            .map(|c| c.data_type.byte_width(varchar_width))
            .sum::<usize>()
            + 1
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn t() -> Table {
        Table::new(
            SchemaTable::new("dbo", "users"),
            vec![
                Column::new("age", DataType::SmallInt, 3),
                Column::new("id", DataType::UniqueIdentifier, 1),
                Column::new("name", DataType::Varchar, 2),
            ],
        )
    }

    #[test]
    fn constructor_sorts_columns_by_position() {
        let table = t();
        assert_eq!(vec!["id", "name", "age"], table.column_names());
    }

    #[test]
    fn row_len_sums_widths_plus_terminator() {
        assert_eq!(16 + 16 + 2 + 1, t().row_len(16));
    }

    #[test]
    fn column_lookup_by_name() {
        let table = t();
        assert_eq!(DataType::SmallInt, table.column("age").unwrap().data_type);
        assert!(table.column("nope").is_none());
    }
}
