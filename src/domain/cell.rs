use std::borrow::Cow;
use std::fmt::Formatter;

use serde_json::Value;

/// A single spreadsheet cell as seen by the reconciliation logic.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Whether the cell counts as missing. Empty text is treated the same as no value,
    /// since the Sheets API does not distinguish the two.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// String form used when comparing identifiers.
    ///
    /// Integral numbers are rendered without a fraction so that `1` read from the
    /// spreadsheet matches `"1"` read from a CSV file.
    /// ```
    /// use sheet_sync::domain::cell::Cell;
    /// assert_eq!(Cell::Number(1.0).as_key(), "1");
    /// assert_eq!(Cell::Number(2.5).as_key(), "2.5");
    /// assert_eq!(Cell::Bool(true).as_key(), "TRUE");
    /// assert_eq!(Cell::Empty.as_key(), "");
    /// ```
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Cell::Empty => Cow::Borrowed(""),
            Cell::Text(text) => Cow::Borrowed(text.as_str()),
            Cell::Number(number) => Cow::Owned(format_number(*number)),
            Cell::Bool(true) => Cow::Borrowed("TRUE"),
            Cell::Bool(false) => Cow::Borrowed("FALSE"),
        }
    }

    /// Infers a typed cell from raw text, as found in CSV files.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Cell::Empty;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Cell::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Cell::Bool(false);
        }
        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => Cell::Number(number),
            _ => Cell::Text(raw.to_string()),
        }
    }
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Empty,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map(Cell::Number)
                .unwrap_or_else(|| Cell::Text(n.to_string())),
            Value::String(s) if s.is_empty() => Cell::Empty,
            Value::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

impl From<&Cell> for Value {
    fn from(cell: &Cell) -> Self {
        match cell {
            Cell::Empty => Value::String(String::new()),
            Cell::Text(text) => Value::String(text.clone()),
            Cell::Number(number) => serde_json::Number::from_f64(*number)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(number.to_string())),
            Cell::Bool(b) => Value::Bool(*b),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}
