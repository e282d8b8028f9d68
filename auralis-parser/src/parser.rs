use auralis_common::err::decode_error::AuralisError;
use auralis_common::schema::data_type::SchemaTable;
use auralis_lexer::{Token, TokenKind};

use crate::ast::{Condition, CreateTableQuery, InsertQuery, Query, Sign, SelectQuery};

/// Consumes a flat token sequence into a tagged `Query`. The first keyword
/// token selects the sub-parser; every other parser below assumes it is
/// only ever invoked after that dispatch.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Query, AuralisError> {
    if tokens.is_empty() {
        return Err(AuralisError::InvalidQuery("empty token stream".into()));
    }

    let first_keyword = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Keyword)
        .map(|t| t.value.as_str())
        .ok_or_else(|| AuralisError::MissingKeyword("no keyword token found".into()))?;

    tracing::trace!(keyword = first_keyword, token_count = tokens.len(), "dispatching query");

    match first_keyword {
        "select" => parse_select(&tokens).map(Query::Select),
        "insert" => parse_insert(&tokens).map(Query::Insert),
        "create" => parse_create_table(&tokens).map(Query::CreateTable),
        other => Err(AuralisError::MissingKeyword(format!(
            "unsupported leading keyword: {}", other
        ))),
    }
}

fn symbol_at<'a>(tokens: &'a [Token], idx: usize) -> Result<&'a Token, AuralisError> {
    tokens
        .get(idx)
        .ok_or_else(|| AuralisError::ParseError("unexpected end of query".into()))
}

fn find_keyword(tokens: &[Token], kw: &str) -> Option<usize> {
    tokens
        .iter()
        .position(|t| t.kind == TokenKind::Keyword && t.value == kw)
}

fn source_table(tokens: &[Token], idx: usize) -> Result<SchemaTable, AuralisError> {
    let tok = symbol_at(tokens, idx)?;
    if tok.kind != TokenKind::Symbol {
        return Err(AuralisError::ParseError("missing source table".into()));
    }
    SchemaTable::try_from(tok.value.as_str())
}

fn sign_of(kind: TokenKind) -> Option<Sign> {
    match kind {
        TokenKind::Eq => Some(Sign::Eq),
        TokenKind::Neq => Some(Sign::Neq),
        TokenKind::Lt => Some(Sign::Lt),
        TokenKind::Lte => Some(Sign::Lte),
        TokenKind::Gt => Some(Sign::Gt),
        TokenKind::Gte => Some(Sign::Gte),
        _ => None,
    }
}

/// `SELECT column_list FROM table_ref [WHERE condition (AND condition)*]`
fn parse_select(tokens: &[Token]) -> Result<SelectQuery, AuralisError> {
    let from_idx = find_keyword(tokens, "from")
        .ok_or_else(|| AuralisError::ParseError("missing FROM".into()))?;

    let column_tokens = &tokens[1..from_idx];
    if column_tokens.is_empty() {
        return Err(AuralisError::ParseError("missing columns list".into()));
    }
    let columns = column_tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Comma)
        .map(|t| t.value.clone())
        .collect::<Vec<_>>();
    if columns.is_empty() {
        return Err(AuralisError::ParseError("empty column specification".into()));
    }

    let source = source_table(tokens, from_idx + 1)?;

    let conditions = match find_keyword(tokens, "where") {
        None => Vec::new(),
        Some(where_idx) => parse_conditions(&tokens[where_idx + 1..])?,
    };

    Ok(SelectQuery {
        source,
        columns,
        conditions,
    })
}

/// `symbol op literal (symbol symbol op literal)*`, the two symbols between
/// predicates being the `and` keyword lexed as a lowercase `Symbol` (`and`
/// is not in the keyword set, §4.1). A bare `OR` is unsupported: a second
/// connector that is not `and` is a parse error.
fn parse_conditions(tokens: &[Token]) -> Result<Vec<Condition>, AuralisError> {
    if tokens.is_empty() {
        return Err(AuralisError::ParseError("empty WHERE clause".into()));
    }

    let mut conditions = Vec::new();
    let mut i = 0usize;

    loop {
        let target = symbol_at(tokens, i)?;
        let op_tok = symbol_at(tokens, i + 1)?;
        let value_tok = symbol_at(tokens, i + 2)?;

        let sign = sign_of(op_tok.kind).ok_or_else(|| {
            AuralisError::ParseError(format!("invalid comparison operator: {:?}", op_tok))
        })?;

        conditions.push(Condition {
            target_column: target.value.clone(),
            sign,
            value: value_tok.value.clone(),
        });

        match tokens.get(i + 3) {
            None => break,
            Some(connector) if connector.value == "and" => {
                i += 4;
            }
            Some(connector) if connector.value == "or" => {
                return Err(AuralisError::ParseError(
                    "OR is not supported in WHERE clauses".into(),
                ));
            }
            Some(other) => {
                return Err(AuralisError::ParseError(format!(
                    "unexpected token after condition: {:?}", other
                )));
            }
        }
    }

    Ok(conditions)
}

/// `INSERT INTO table_ref [ '(' col_list ')' ] VALUES '(' lit_list ')' (',' '(' lit_list ')')*`
fn parse_insert(tokens: &[Token]) -> Result<InsertQuery, AuralisError> {
    let into_idx = find_keyword(tokens, "into")
        .ok_or_else(|| AuralisError::ParseError("missing INTO".into()))?;
    let values_idx = find_keyword(tokens, "values")
        .ok_or_else(|| AuralisError::ParseError("missing VALUES".into()))?;

    let source = source_table(tokens, into_idx + 1)?;

    // Optional explicit column list: table_ref [ '(' col_list ')' ] VALUES
    let between = &tokens[into_idx + 2..values_idx];
    let columns = if between.is_empty() {
        Vec::new()
    } else {
        parse_paren_symbol_list(between)?
    };

    let rows = parse_value_row_lists(&tokens[values_idx + 1..])?;

    Ok(InsertQuery {
        source,
        columns,
        rows,
    })
}

/// Parses `'(' a, b, c ')'` into the contained symbol values.
fn parse_paren_symbol_list(tokens: &[Token]) -> Result<Vec<String>, AuralisError> {
    if tokens.first().map(|t| t.kind) != Some(TokenKind::OpenParen) {
        return Err(AuralisError::ParseError("expected '('".into()));
    }
    if tokens.last().map(|t| t.kind) != Some(TokenKind::CloseParen) {
        return Err(AuralisError::ParseError("expected ')'".into()));
    }
    let inner = &tokens[1..tokens.len() - 1];
    if inner.is_empty() {
        return Err(AuralisError::ParseError("empty column specification".into()));
    }
    Ok(inner
        .iter()
        .filter(|t| t.kind != TokenKind::Comma)
        .map(|t| t.value.clone())
        .collect())
}

/// Parses one or more parenthesized, comma-separated literal lists:
/// `'(' lit, lit ')' (',' '(' lit, lit ')')*`
fn parse_value_row_lists(tokens: &[Token]) -> Result<Vec<Vec<String>>, AuralisError> {
    let mut rows = Vec::new();
    let mut i = 0usize;

    while i < tokens.len() {
        if tokens[i].kind != TokenKind::OpenParen {
            return Err(AuralisError::ParseError("expected '(' in VALUES list".into()));
        }
        let close = tokens[i..]
            .iter()
            .position(|t| t.kind == TokenKind::CloseParen)
            .map(|p| p + i)
            .ok_or_else(|| AuralisError::ParseError("unterminated VALUES list".into()))?;

        let row = parse_paren_symbol_list(&tokens[i..=close])?;
        rows.push(row);

        i = close + 1;
        if i < tokens.len() {
            if tokens[i].kind != TokenKind::Comma {
                return Err(AuralisError::ParseError(
                    "expected ',' between VALUES rows".into(),
                ));
            }
            i += 1;
        }
    }

    if rows.is_empty() {
        return Err(AuralisError::ParseError("missing VALUES".into()));
    }
    Ok(rows)
}

/// `CREATE TABLE table_ref '(' column_def (',' column_def)* ')'`
/// `column_def := symbol symbol+` — first symbol is the column name, the
/// rest is the type plus attributes (attributes are collected but unused).
fn parse_create_table(tokens: &[Token]) -> Result<CreateTableQuery, AuralisError> {
    let table_idx = tokens
        .iter()
        .position(|t| t.kind == TokenKind::Keyword && t.value == "table")
        .ok_or_else(|| AuralisError::ParseError("missing TABLE".into()))?;

    let source = source_table(tokens, table_idx + 1)?;

    let open = table_idx + 2;
    if tokens.get(open).map(|t| t.kind) != Some(TokenKind::OpenParen) {
        return Err(AuralisError::ParseError("missing column specification".into()));
    }
    if tokens.last().map(|t| t.kind) != Some(TokenKind::CloseParen) {
        return Err(AuralisError::ParseError("unterminated column specification".into()));
    }
    let inner = &tokens[open + 1..tokens.len() - 1];
    if inner.is_empty() {
        return Err(AuralisError::ParseError("empty column specification".into()));
    }

    let mut columns = Vec::new();
    for chunk in inner.split(|t| t.kind == TokenKind::Comma) {
        if chunk.is_empty() {
            return Err(AuralisError::ParseError("empty column definition".into()));
        }
        let name = chunk[0].value.clone();
        let rest = &chunk[1..];
        if rest.is_empty() {
            return Err(AuralisError::ParseError(format!(
                "column '{}' is missing a data type", name
            )));
        }
        let data_type = rest[0].value.clone();
        let attrs = rest[1..].iter().map(|t| t.value.clone()).collect();
        columns.push((name, data_type, attrs));
    }

    Ok(CreateTableQuery { source, columns })
}

#[cfg(test)]
mod test {
    use auralis_lexer::analyze;

    use super::*;

    fn parse(sql: &str) -> Result<Query, AuralisError> {
        parse_tokens(analyze(sql).unwrap())
    }

    #[test]
    fn select_star_expands_later_and_resolves_table() {
        let q = parse("SELECT * FROM dbo.users").unwrap();
        match q {
            Query::Select(s) => {
                assert_eq!(vec!["*".to_string()], s.columns);
                assert_eq!("dbo", s.source.schema);
                assert_eq!("users", s.source.name);
                assert!(s.conditions.is_empty());
            }
            _ => panic!("expected Select"),
        }
    }

    #[test]
    fn select_bare_table_defaults_to_dbo() {
        let q = parse("SELECT name FROM users").unwrap();
        match q {
            Query::Select(s) => assert_eq!("dbo", s.source.schema),
            _ => panic!("expected Select"),
        }
    }

    #[test]
    fn select_with_single_where_condition() {
        let q = parse("SELECT name FROM dbo.users WHERE age = 30").unwrap();
        match q {
            Query::Select(s) => {
                assert_eq!(1, s.conditions.len());
                assert_eq!("age", s.conditions[0].target_column);
                assert_eq!(Sign::Eq, s.conditions[0].sign);
                assert_eq!("30", s.conditions[0].value);
            }
            _ => panic!("expected Select"),
        }
    }

    #[test]
    fn select_with_conjunctive_where() {
        let q = parse("SELECT column_name FROM auralis.columns WHERE table_schema = 'dbo' AND table_name = 'users'").unwrap();
        match q {
            Query::Select(s) => {
                assert_eq!(2, s.conditions.len());
                assert_eq!("table_schema", s.conditions[0].target_column);
                assert_eq!("table_name", s.conditions[1].target_column);
            }
            _ => panic!("expected Select"),
        }
    }

    #[test]
    fn select_with_or_is_a_parse_error() {
        assert!(parse("SELECT name FROM users WHERE age = 1 OR age = 2").is_err());
    }

    #[test]
    fn select_missing_from_is_an_error() {
        assert!(parse("SELECT name users").is_err());
    }

    #[test]
    fn insert_without_column_list() {
        let q = parse("INSERT INTO dbo.users VALUES ('a', 'b')").unwrap();
        match q {
            Query::Insert(ins) => {
                assert!(ins.columns.is_empty());
                assert_eq!(1, ins.rows.len());
                assert_eq!(vec!["'a'".to_string(), "'b'".to_string()], ins.rows[0]);
            }
            _ => panic!("expected Insert"),
        }
    }

    #[test]
    fn insert_with_explicit_column_list() {
        let q = parse("INSERT INTO dbo.users (age, name) VALUES (30, 'alice')").unwrap();
        match q {
            Query::Insert(ins) => {
                assert_eq!(vec!["age".to_string(), "name".to_string()], ins.columns);
                assert_eq!(vec!["30".to_string(), "'alice'".to_string()], ins.rows[0]);
            }
            _ => panic!("expected Insert"),
        }
    }

    #[test]
    fn insert_with_multiple_value_rows() {
        let q = parse("INSERT INTO dbo.users VALUES ('a', 1), ('b', 2)").unwrap();
        match q {
            Query::Insert(ins) => assert_eq!(2, ins.rows.len()),
            _ => panic!("expected Insert"),
        }
    }

    #[test]
    fn create_table_preserves_declaration_order() {
        let q = parse("CREATE TABLE dbo.users (id uniqueidentifier, name varchar, age smallint)").unwrap();
        match q {
            Query::CreateTable(ct) => {
                assert_eq!(3, ct.columns.len());
                assert_eq!("id", ct.columns[0].0);
                assert_eq!("name", ct.columns[1].0);
                assert_eq!("age", ct.columns[2].0);
            }
            _ => panic!("expected CreateTable"),
        }
    }

    #[test]
    fn create_table_collects_attributes() {
        let q = parse("CREATE TABLE dbo.users (id smallint not null)").unwrap();
        match q {
            Query::CreateTable(ct) => {
                assert_eq!("smallint", ct.columns[0].1);
                assert_eq!(vec!["not".to_string(), "null".to_string()], ct.columns[0].2);
            }
            _ => panic!("expected CreateTable"),
        }
    }

    #[test]
    fn empty_query_is_invalid() {
        assert!(parse_tokens(Vec::new()).is_err());
    }
}
