use serde::{Deserialize, Serialize};
use std::fmt;

/// A plain cell value.
///
/// Text that looks numeric stays text: `Text("36")` and `Number(36.0)` are
/// different values and never match each other in a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Empty text counts as an empty cell.
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_text_is_not_a_number() {
        assert_ne!(CellValue::from("36"), CellValue::from(36.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::from(48.0).to_string(), "48");
        assert_eq!(CellValue::from(2.5).to_string(), "2.5");
        assert_eq!(CellValue::from(true).to_string(), "TRUE");
        assert_eq!(CellValue::from("Smith").to_string(), "Smith");
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<CellValue> = serde_json::from_str(r#"["36", 36, false]"#).unwrap();
        assert_eq!(
            values,
            vec![
                CellValue::Text("36".to_string()),
                CellValue::Number(36.0),
                CellValue::Boolean(false)
            ]
        );
    }
}
