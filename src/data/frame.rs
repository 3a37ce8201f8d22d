use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata value attached to a [`DataFrame`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{}", v),
            AttrValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(value as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// A table of named numeric columns read from one logger CSV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<(String, Vec<f64>)>,
    pub attrs: HashMap<String, AttrValue>,
}

impl DataFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a frame from column names and row-major values.
    ///
    /// Rows shorter than the header leave the missing cells out of their
    /// columns; callers validate widths before this point.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        let mut columns: Vec<(String, Vec<f64>)> = names
            .into_iter()
            .map(|name| (name, Vec::with_capacity(rows.len())))
            .collect();

        for row in rows {
            for (column, value) in columns.iter_mut().zip(row) {
                column.1.push(value);
            }
        }

        Self {
            columns,
            attrs: HashMap::new(),
        }
    }

    pub fn with_column(mut self, name: &str, values: Vec<f64>) -> Self {
        self.columns.push((name.to_string(), values));
        self
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.first().map(|(_, values)| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_transposes() {
        let df = DataFrame::from_rows(
            vec!["time".to_string(), "duration_0".to_string()],
            vec![vec![0.0, 10.0], vec![0.1, 12.0], vec![0.2, 11.0]],
        );

        assert_eq!(df.len(), 3);
        assert_eq!(df.column("duration_0"), Some(&[10.0, 12.0, 11.0][..]));
        assert_eq!(df.column_names().collect::<Vec<_>>(), vec!["time", "duration_0"]);
        assert!(df.column("missing").is_none());
    }

    #[test]
    fn test_attr_display() {
        let df = DataFrame::new()
            .with_attr("id", 7u32)
            .with_attr("prefix", "Fiducial");

        assert_eq!(df.attr("id").map(|v| v.to_string()), Some("7".to_string()));
        assert_eq!(df.attr("prefix"), Some(&AttrValue::Text("Fiducial".to_string())));
        assert!(df.is_empty());
    }
}
