use auralis_common::dataset::DataSet;
use auralis_common::value::Value;

/// Renders a `DataSet` as a minimal fixed-width ASCII grid — the
/// result-rendering table formatter named in §1 as a thin external
/// collaborator over the core.
pub fn render_table(dataset: &DataSet) -> String {
    if dataset.columns.is_empty() {
        return "(no columns)".to_string();
    }

    let rows: Vec<Vec<String>> = dataset
        .rows
        .iter()
        .map(|row| row.iter().map(render_cell).collect())
        .collect();

    let widths: Vec<usize> = dataset
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .map(|r| r[i].len())
                .max()
                .unwrap_or(0)
                .max(name.len())
        })
        .collect();

    let mut out = String::new();
    out.push_str(&render_row(&dataset.columns, &widths));
    out.push('\n');
    out.push_str(&render_separator(&widths));
    for row in &rows {
        out.push('\n');
        out.push_str(&render_row(row, &widths));
    }
    out
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::SmallInt(v) => v.to_string(),
        Value::Integer(v) => v.to_string(),
        Value::BigInt(v) => v.to_string(),
        Value::Varchar(s) => s.clone(),
        Value::UniqueIdentifier(u) => u.to_string(),
        Value::Boolean(b) => b.to_string(),
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(c, w)| format!("{:width$}", c, width = w))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_separator(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-")
}
