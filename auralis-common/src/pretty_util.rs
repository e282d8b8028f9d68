use std::fmt::Debug;
use std::str::FromStr;

use serde::Serialize;

/// Output shape requested on the CLI via `--format`.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Format {
    Json,
    Yaml,
    Table,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" => Ok(Format::Yaml),
            "table" => Ok(Format::Table),
            other => Err(format!("unknown format: {} (expected json|yaml|table)", other)),
        }
    }
}

pub fn to_string_pretty<T: Sized + Serialize + Debug>(f: &Format, val: &T) -> String {
    match f {
        Format::Json => match serde_json::to_string_pretty(val) {
            Ok(v) => v,
            Err(_) => format!("to_string_pretty Json error: {:?}", val),
        },
        Format::Yaml => match serde_yaml::to_string(val) {
            Ok(v) => v,
            Err(_) => format!("to_string_pretty Yaml error: {:?}", val),
        },
        Format::Table => format!("{:?}", val),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn to_string_pretty_json_round_trips_a_vec() {
        let v = vec!["a".to_string(), "b".to_string()];
        let s = to_string_pretty(&Format::Json, &v);
        assert!(s.contains('a'));
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert!(matches!("JSON".parse::<Format>().unwrap(), Format::Json));
        assert!(matches!("yaml".parse::<Format>().unwrap(), Format::Yaml));
        assert!(matches!("Table".parse::<Format>().unwrap(), Format::Table));
        assert!("xml".parse::<Format>().is_err());
    }
}
