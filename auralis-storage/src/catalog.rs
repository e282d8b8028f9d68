use std::fs;

use auralis_common::config::EngineConfig;
use auralis_common::err::decode_error::AuralisError;
use auralis_common::predicate::{Predicate, Sign};
use auralis_common::schema::data_type::{DataType, SchemaTable};
use auralis_common::schema::table::{Column, Table};
use auralis_common::value::Value;

use crate::file::{create_table_file, read_from_table, write_into_table};

/// Database name recorded in every `auralis.tables` row. There is no
/// multi-database concept in this core; every table — user or internal —
/// belongs to the single `auralis` database.
const DATABASE_NAME: &str = "auralis";
const AURALIS_SCHEMA: &str = "auralis";

/// The `auralis.tables` schema as a compile-time constant (§9 redesign:
/// hard-coded, not constructed by routing through `INSERT`).
pub fn tables_catalog_table() -> Table {
    Table::new(
        SchemaTable::new(AURALIS_SCHEMA, "tables"),
        vec![
            Column::new("database_name", DataType::Varchar, 1),
            Column::new("table_schema", DataType::Varchar, 2),
            Column::new("table_name", DataType::Varchar, 3),
        ],
    )
}

/// The `auralis.columns` schema as a compile-time constant.
pub fn columns_catalog_table() -> Table {
    Table::new(
        SchemaTable::new(AURALIS_SCHEMA, "columns"),
        vec![
            Column::new("table_schema", DataType::Varchar, 1),
            Column::new("table_name", DataType::Varchar, 2),
            Column::new("column_name", DataType::Varchar, 3),
            Column::new("data_type", DataType::Varchar, 4),
            Column::new("position", DataType::SmallInt, 5),
        ],
    )
}

/// Bootstraps the catalog: creates the data directory and the two catalog
/// files, then appends rows (via the row codec directly, not `INSERT`)
/// describing `auralis.tables` and `auralis.columns` themselves (I3).
/// Idempotent: a no-op if the data directory already exists.
pub fn bootstrap(cfg: &EngineConfig) -> Result<(), AuralisError> {
    if cfg.data_dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(&cfg.data_dir)?;

    let tables_meta = tables_catalog_table();
    let columns_meta = columns_catalog_table();
    create_table_file(cfg, &tables_meta)?;
    create_table_file(cfg, &columns_meta)?;

    write_into_table(
        cfg,
        &tables_meta,
        &[
            tables_row(&tables_meta.schema_table),
            tables_row(&columns_meta.schema_table),
        ],
    )?;

    let mut column_rows = Vec::new();
    column_rows.extend(columns_rows_for(&tables_meta));
    column_rows.extend(columns_rows_for(&columns_meta));
    write_into_table(cfg, &columns_meta, &column_rows)?;

    Ok(())
}

fn tables_row(schema_table: &SchemaTable) -> Vec<Value> {
    vec![
        Value::Varchar(DATABASE_NAME.to_string()),
        Value::Varchar(schema_table.schema.clone()),
        Value::Varchar(schema_table.name.clone()),
    ]
}

fn columns_rows_for(table: &Table) -> Vec<Vec<Value>> {
    table
        .columns
        .iter()
        .map(|col| {
            vec![
                Value::Varchar(table.schema_table.schema.clone()),
                Value::Varchar(table.schema_table.name.clone()),
                Value::Varchar(col.name.clone()),
                Value::Varchar(col.data_type.as_str().to_string()),
                Value::SmallInt(col.position as i16),
            ]
        })
        .collect()
}

/// Registers a newly created user table: one row in `auralis.tables`,
/// `|T.columns|` rows in `auralis.columns`.
pub fn add_table(cfg: &EngineConfig, table: &Table) -> Result<(), AuralisError> {
    write_into_table(cfg, &tables_catalog_table(), &[tables_row(&table.schema_table)])?;
    write_into_table(cfg, &columns_catalog_table(), &columns_rows_for(table))?;
    Ok(())
}

/// Scans `auralis.columns` with the conjunctive predicate `table_schema = s
/// AND table_name = n` (§9 redesign: full conjunctive filtering) and
/// reconstructs the column list in ascending `position` order.
pub fn get_table(cfg: &EngineConfig, schema_table: &SchemaTable) -> Result<Table, AuralisError> {
    let columns_meta = columns_catalog_table();
    let predicates = vec![
        Predicate::new("table_schema", Sign::Eq, Value::Varchar(schema_table.schema.clone())),
        Predicate::new("table_name", Sign::Eq, Value::Varchar(schema_table.name.clone())),
    ];
    let projection = vec![
        "column_name".to_string(),
        "data_type".to_string(),
        "position".to_string(),
    ];

    let dataset = read_from_table(cfg, &columns_meta, &projection, &predicates)?;
    if dataset.is_empty() {
        return Err(AuralisError::TableDescriptorNotFound(format!(
            "no catalog entry for table {}", schema_table
        )));
    }

    let mut columns = Vec::with_capacity(dataset.rows.len());
    for row in &dataset.rows {
        let name = expect_varchar(&row[0])?;
        let data_type_name = expect_varchar(&row[1])?;
        let position = expect_smallint(&row[2])?;
        columns.push(Column::new(name, DataType::try_from(data_type_name.as_str())?, position as u16));
    }

    Ok(Table::new(schema_table.clone(), columns))
}

fn expect_varchar(v: &Value) -> Result<String, AuralisError> {
    match v {
        Value::Varchar(s) => Ok(s.clone()),
        other => Err(AuralisError::Bug(format!("catalog: expected varchar, got {:?}", other))),
    }
}

fn expect_smallint(v: &Value) -> Result<i16, AuralisError> {
    match v {
        Value::SmallInt(n) => Ok(*n),
        other => Err(AuralisError::Bug(format!("catalog: expected smallint, got {:?}", other))),
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    fn cfg(dir: &std::path::Path) -> EngineConfig {
        EngineConfig::default().with_data_dir(dir)
    }

    #[test]
    fn bootstrap_is_idempotent() {
        let dir = tempdir().unwrap();
        let cfg = cfg(dir.path());
        bootstrap(&cfg).unwrap();
        bootstrap(&cfg).unwrap();
    }

    #[test]
    fn catalog_describes_itself_after_bootstrap() {
        let dir = tempdir().unwrap();
        let cfg = cfg(dir.path());
        bootstrap(&cfg).unwrap();

        let tables = get_table(&cfg, &SchemaTable::new("auralis", "tables")).unwrap();
        assert_eq!(3, tables.columns.len());
        assert_eq!(vec!["database_name", "table_schema", "table_name"], tables.column_names());

        let columns = get_table(&cfg, &SchemaTable::new("auralis", "columns")).unwrap();
        assert_eq!(5, columns.columns.len());
        assert_eq!(
            vec!["table_schema", "table_name", "column_name", "data_type", "position"],
            columns.column_names()
        );
    }

    #[test]
    fn add_table_then_get_table_round_trips() {
        let dir = tempdir().unwrap();
        let cfg = cfg(dir.path());
        bootstrap(&cfg).unwrap();

        let user_table = Table::new(
            SchemaTable::new("dbo", "users"),
            vec![
                Column::new("id", DataType::UniqueIdentifier, 1),
                Column::new("name", DataType::Varchar, 2),
                Column::new("age", DataType::SmallInt, 3),
            ],
        );
        add_table(&cfg, &user_table).unwrap();

        let fetched = get_table(&cfg, &SchemaTable::new("dbo", "users")).unwrap();
        assert_eq!(vec!["id", "name", "age"], fetched.column_names());
        assert_eq!(DataType::SmallInt, fetched.column("age").unwrap().data_type);
    }

    #[test]
    fn missing_table_is_table_descriptor_not_found() {
        let dir = tempdir().unwrap();
        let cfg = cfg(dir.path());
        bootstrap(&cfg).unwrap();

        let err = get_table(&cfg, &SchemaTable::new("dbo", "nope")).unwrap_err();
        assert_eq!("TABLE_DESCRIPTOR_NOT_FOUND", err.code());
    }

    #[test]
    fn conjunctive_lookup_does_not_conflate_same_named_tables_in_different_schemas() {
        let dir = tempdir().unwrap();
        let cfg = cfg(dir.path());
        bootstrap(&cfg).unwrap();

        let a = Table::new(
            SchemaTable::new("dbo", "accounts"),
            vec![Column::new("id", DataType::SmallInt, 1)],
        );
        let b = Table::new(
            SchemaTable::new("billing", "accounts"),
            vec![
                Column::new("id", DataType::SmallInt, 1),
                Column::new("balance", DataType::BigInt, 2),
            ],
        );
        add_table(&cfg, &a).unwrap();
        add_table(&cfg, &b).unwrap();

        let fetched_a = get_table(&cfg, &SchemaTable::new("dbo", "accounts")).unwrap();
        let fetched_b = get_table(&cfg, &SchemaTable::new("billing", "accounts")).unwrap();
        assert_eq!(1, fetched_a.columns.len());
        assert_eq!(2, fetched_b.columns.len());
    }
}
