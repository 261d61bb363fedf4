use std::fmt;

/// A value decoded from a fixed-column slice of a PDB record.
///
/// Decoding is total: every slice maps to exactly one variant. The slice is
/// stripped of surrounding whitespace and then tried, in order, as an integer,
/// as a floating-point number and finally kept as text. An empty slice is
/// [`FieldValue::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The slice contained only whitespace.
    Null,
    /// The slice parsed as a base-10 integer with an optional sign.
    Integer(i64),
    /// The slice parsed as a floating-point number.
    Float(f64),
    /// The slice did not parse as a number.
    Text(String),
}

impl FieldValue {
    /// Coerces a raw slice into a typed value.
    ///
    /// # Arguments
    ///
    /// * `raw` - The slice as cut from the record, surrounding whitespace included.
    ///
    /// # Return
    ///
    /// The first successful interpretation among null, integer, float and text.
    pub fn coerce(raw: &str) -> Self {
        let chunk = raw.trim();
        if chunk.is_empty() {
            return FieldValue::Null;
        }
        if let Ok(value) = chunk.parse::<i64>() {
            return FieldValue::Integer(value);
        }
        if let Ok(value) = chunk.parse::<f64>() {
            return FieldValue::Float(value);
        }
        FieldValue::Text(chunk.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(value) => Some(*value as f64),
            FieldValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Float(value) => write!(f, "{}", value),
            FieldValue::Text(value) => write!(f, "{}", value),
        }
    }
}
