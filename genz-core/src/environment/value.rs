use std::fmt::Display;

/// Result of the unit statement kinds and the value a literal `0` produces.
pub const UNIT: Value = Value::Integer { value: 0 };

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer {
        value: i64
    },
    String {
        value: String,
    },
}

/// Renders exactly what `spill` writes: decimal digits or the raw text.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::String { value } => write!(f, "{value}"),
        }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::String { .. } => ValueType::String,
        }
    }

    /// Source form of the value, with text quoted and escaped.
    pub fn as_literal(&self) -> String {
        match self {
            Self::Integer { value } => value.to_string(),
            Self::String { value } => {
                let escaped = value.chars()
                    .map(|ch| match ch {
                        '\n' => "\\n".to_string(),
                        '\t' => "\\t".to_string(),
                        '"' => "\\\"".to_string(),
                        '\\' => "\\\\".to_string(),
                        ch => ch.to_string(),
                    })
                    .collect::<String>();

                format!("\"{escaped}\"")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer { value }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Integer { value: value as i64 }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String { value: value.to_string() }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String { value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    String,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Integer => write!(f, "Integer"),
            ValueType::String => write!(f, "String"),
        }
    }
}
