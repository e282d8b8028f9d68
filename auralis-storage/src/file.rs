use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};

use auralis_common::config::EngineConfig;
use auralis_common::dataset::DataSet;
use auralis_common::err::decode_error::AuralisError;
use auralis_common::predicate::Predicate;
use auralis_common::schema::table::Table;
use auralis_common::value::Value;

use crate::codec::{decode_cell, encode_row};
use crate::eval::{ensure_comparable, evaluate};

const FILE_WRITE_BUFFER_SIZE: usize = 4 * 1024;
const FILE_READ_BUFFER_SIZE: usize = 16 * 1024;

/// Creates the table's empty data file. Fails if the data directory itself
/// does not exist (the catalog bootstrap is responsible for that, §4.6).
pub fn create_table_file(cfg: &EngineConfig, table: &Table) -> Result<(), AuralisError> {
    let path = cfg.table_path(&table.schema_table.schema, &table.schema_table.name);
    File::create(&path)?;
    Ok(())
}

/// Appends typed rows to a table's data file. Opens in append mode,
/// encodes every row, writes them all, and flushes once at the end — a
/// single `flush` from the caller's perspective, no locking (§4.4, §5).
pub fn write_into_table(
    cfg: &EngineConfig,
    table: &Table,
    rows: &[Vec<Value>],
) -> Result<(), AuralisError> {
    let path = cfg.table_path(&table.schema_table.schema, &table.schema_table.name);
    let file = OpenOptions::new()
        .append(true)
        .open(&path)
        .map_err(|e| map_missing_file(e, &table.schema_table))?;

    let mut writer = BufWriter::with_capacity(FILE_WRITE_BUFFER_SIZE, file);
    for row in rows {
        let encoded = encode_row(row, cfg.varchar_width)?;
        writer.write_all(&encoded)?;
    }
    writer.flush()?;
    tracing::trace!(table = %table.schema_table, rows = rows.len(), "appended rows");
    Ok(())
}

fn map_missing_file(e: std::io::Error, source: &auralis_common::schema::data_type::SchemaTable) -> AuralisError {
    if e.kind() == ErrorKind::NotFound {
        AuralisError::TableNotFound(format!("no data file for table {}", source))
    } else {
        AuralisError::Io(e)
    }
}

/// Scans a table's data file row by row, decoding only the columns that
/// are either projected or targeted by a predicate, evaluating every
/// predicate conjunctively per row (§4.4, §4.5). Short rows at the file's
/// tail (not a full `rowlen`) are silently ignored, matching the reference
/// behavior — not an error. Output columns and cells are both ordered by
/// declared column position, regardless of the order `projection` lists
/// them in (§3: `DataSet.columns` is "the table's declared order").
pub fn read_from_table(
    cfg: &EngineConfig,
    table: &Table,
    projection: &[String],
    predicates: &[Predicate],
) -> Result<DataSet, AuralisError> {
    for p in predicates {
        if let Some(col) = table.column(&p.column) {
            ensure_comparable(col.data_type)?;
        }
    }

    tracing::trace!(
        table = %table.schema_table,
        projection = ?projection,
        predicates = predicates.len(),
        "scanning table"
    );

    let path = cfg.table_path(&table.schema_table.schema, &table.schema_table.name);
    let file = File::open(&path).map_err(|e| map_missing_file(e, &table.schema_table))?;
    let mut reader = BufReader::with_capacity(FILE_READ_BUFFER_SIZE, file);

    let row_len = table.row_len(cfg.varchar_width);
    let mut buf = vec![0u8; row_len];
    let mut out_rows = Vec::new();
    let out_columns: Vec<String> = table
        .columns
        .iter()
        .map(|c| c.name.clone())
        .filter(|name| projection.iter().any(|p| p == name))
        .collect();

    loop {
        match read_full_row(&mut reader, &mut buf) {
            ReadOutcome::Eof => break,
            ReadOutcome::Short => break,
            ReadOutcome::Full => {}
        }

        let mut excluded = false;
        let mut offset = 0usize;
        let mut cells = Vec::with_capacity(projection.len());

        for column in &table.columns {
            let width = column.data_type.byte_width(cfg.varchar_width);
            let needed_for_projection = projection.iter().any(|p| p == &column.name);
            let matching_predicates: Vec<&Predicate> =
                predicates.iter().filter(|p| p.column == column.name).collect();

            if !needed_for_projection && matching_predicates.is_empty() {
                offset += width;
                continue;
            }

            let slice = &buf[offset..offset + width];
            let decoded = decode_cell(column.data_type, slice, cfg.varchar_width)?;

            for predicate in matching_predicates {
                if !evaluate(&decoded, predicate.sign, &predicate.value)? {
                    excluded = true;
                }
            }

            if needed_for_projection {
                cells.push(decoded);
            }

            offset += width;
        }

        if !excluded {
            out_rows.push(cells);
        }
    }

    tracing::trace!(table = %table.schema_table, matched = out_rows.len(), "scan complete");
    Ok(DataSet::new(out_columns, out_rows))
}

enum ReadOutcome {
    Full,
    Short,
    Eof,
}

/// Reads exactly `buf.len()` bytes, distinguishing a clean EOF (zero bytes
/// read) from a short trailing read (partial row) from a full row.
fn read_full_row<R: Read>(reader: &mut R, buf: &mut [u8]) -> ReadOutcome {
    let mut total = 0usize;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(_) => break,
        }
    }
    if total == 0 {
        ReadOutcome::Eof
    } else if total < buf.len() {
        ReadOutcome::Short
    } else {
        ReadOutcome::Full
    }
}
