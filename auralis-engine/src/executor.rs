use tracing::debug;

use auralis_common::config::EngineConfig;
use auralis_common::dataset::DataSet;
use auralis_common::err::decode_error::AuralisError;
use auralis_common::predicate::Predicate;
use auralis_common::schema::data_type::DataType;
use auralis_common::schema::table::{Column, Table};
use auralis_common::value::convert;
use auralis_parser::{CreateTableQuery, InsertQuery, Query, SelectQuery};

/// Parses and executes one raw query string end to end: lex, parse,
/// dispatch on the resulting tagged `Query`. No caching, no transaction —
/// every call re-resolves the target table from the catalog on disk (§5).
pub fn execute(cfg: &EngineConfig, raw_query: &str) -> Result<DataSet, AuralisError> {
    let tokens = auralis_lexer::analyze(raw_query)?;
    if tokens.is_empty() {
        return Err(AuralisError::InvalidQuery("empty token stream".into()));
    }

    let query = auralis_parser::parse_tokens(tokens)?;
    debug!(?query, "parsed query");

    match query {
        Query::Select(q) => execute_select(cfg, q),
        Query::Insert(q) => execute_insert(cfg, q),
        Query::CreateTable(q) => execute_create_table(cfg, q),
    }
}

/// Resolves the table, expands a `*` projection to the declared column
/// list, converts every `WHERE` literal to its column's type, then
/// delegates to the row scanner.
fn execute_select(cfg: &EngineConfig, query: SelectQuery) -> Result<DataSet, AuralisError> {
    let table = auralis_storage::get_table(cfg, &query.source)?;

    let projection = if query.columns.len() == 1 && query.columns[0] == "*" {
        table.column_names()
    } else {
        query.columns
    };

    let mut predicates = Vec::with_capacity(query.conditions.len());
    for condition in &query.conditions {
        let column = table.column(&condition.target_column).ok_or_else(|| {
            AuralisError::ParseError(format!(
                "unknown column in WHERE clause: {}", condition.target_column
            ))
        })?;
        let value = convert(column.data_type, &condition.value)?;
        predicates.push(Predicate::new(condition.target_column.clone(), condition.sign, value));
    }

    auralis_storage::read_from_table(cfg, &table, &projection, &predicates)
}

/// Resolves the table, reorders supplied literals by the explicit column
/// list when present (§4.2, §8 scenario 9), converts every literal to its
/// declared column type, and appends the typed rows.
fn execute_insert(cfg: &EngineConfig, query: InsertQuery) -> Result<DataSet, AuralisError> {
    let table = auralis_storage::get_table(cfg, &query.source)?;

    let mut typed_rows = Vec::with_capacity(query.rows.len());
    for raw_row in &query.rows {
        let ordered = reorder_by_declared_columns(&table, &query.columns, raw_row)?;
        let mut typed_row = Vec::with_capacity(table.columns.len());
        for (column, literal) in table.columns.iter().zip(ordered.iter()) {
            typed_row.push(convert(column.data_type, literal)?);
        }
        typed_rows.push(typed_row);
    }

    auralis_storage::write_into_table(cfg, &table, &typed_rows)?;
    Ok(DataSet::empty(table.column_names()))
}

/// When an explicit column list accompanies `INSERT`, re-maps each
/// supplied literal to its column's declared position. With no explicit
/// list, literals are assumed already in declared order.
fn reorder_by_declared_columns(
    table: &Table,
    explicit_columns: &[String],
    raw_row: &[String],
) -> Result<Vec<String>, AuralisError> {
    if explicit_columns.is_empty() {
        return Ok(raw_row.to_vec());
    }
    if explicit_columns.len() != raw_row.len() {
        return Err(AuralisError::ParseError(format!(
            "INSERT column count ({}) does not match value count ({})",
            explicit_columns.len(),
            raw_row.len()
        )));
    }

    let mut ordered = vec![String::new(); table.columns.len()];
    for (name, literal) in explicit_columns.iter().zip(raw_row.iter()) {
        let idx = table
            .columns
            .iter()
            .position(|c| &c.name == name)
            .ok_or_else(|| AuralisError::ParseError(format!("unknown column in INSERT: {}", name)))?;
        ordered[idx] = literal.clone();
    }
    Ok(ordered)
}

/// Builds a column list from the parser's ordered `(name, type, attrs)`
/// sequence, assigning ascending `position` from declaration order, then
/// registers the table with the catalog and creates its empty data file.
fn execute_create_table(cfg: &EngineConfig, query: CreateTableQuery) -> Result<DataSet, AuralisError> {
    let mut columns = Vec::with_capacity(query.columns.len());
    for (position, (name, type_name, _attrs)) in query.columns.into_iter().enumerate() {
        let data_type = DataType::try_from(type_name.as_str())?;
        columns.push(Column::new(name, data_type, (position + 1) as u16));
    }

    let table = Table::new(query.source, columns);
    auralis_storage::add_table(cfg, &table)?;
    auralis_storage::create_table_file(cfg, &table)?;

    Ok(DataSet::empty(table.column_names()))
}
