use std::fmt;

use crate::NULL_SENTINEL;

/// A typed SQL literal, decided once at the statement-builder boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// Integer literal assigned by the system (surrogate ids), unquoted.
    Int(i64),
    /// Numeric-looking source field, embedded unquoted. The source
    /// spelling is kept verbatim so dedup keys never canonicalize
    /// (`"007"` stays `"007"`, never `"7"`).
    Number(String),
    /// String literal, single-quoted. Embedded quotes are not escaped;
    /// a known limitation carried over from the statement format.
    Text(String),
    /// Raw sub-expression, embedded verbatim.
    Raw(String),
    /// The null sentinel, rendered as the bare token `null`.
    Null,
}

impl SqlValue {
    /// Classify a source field: numeric strings become `Number`,
    /// parenthesized fragments stay raw, the sentinel literal becomes
    /// `Null`, everything else is quoted text. The original field spelling
    /// is preserved in every case.
    pub fn from_field(field: &str) -> Self {
        if field == NULL_SENTINEL {
            return SqlValue::Null;
        }
        if field.parse::<i64>().is_ok() {
            return SqlValue::Number(field.to_string());
        }
        if field.starts_with('(') && field.ends_with(')') {
            return SqlValue::Raw(field.to_string());
        }
        SqlValue::Text(field.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Int(value) => write!(f, "{value}"),
            SqlValue::Number(value) => write!(f, "{value}"),
            SqlValue::Text(value) => write!(f, "'{value}'"),
            SqlValue::Raw(value) => write!(f, "{value}"),
            SqlValue::Null => write!(f, "{NULL_SENTINEL}"),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::from_field(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::from_field(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_render_unquoted() {
        assert_eq!(SqlValue::from_field("30").to_string(), "30");
        assert_eq!(SqlValue::from_field("-7").to_string(), "-7");
    }

    #[test]
    fn numeric_fields_keep_their_source_spelling() {
        assert_eq!(
            SqlValue::from_field("007"),
            SqlValue::Number("007".to_string())
        );
        assert_eq!(SqlValue::from_field("007").to_string(), "007");
        assert_ne!(SqlValue::from_field("07"), SqlValue::from_field("7"));
    }

    #[test]
    fn text_fields_are_single_quoted() {
        assert_eq!(SqlValue::from_field("Bogota").to_string(), "'Bogota'");
    }

    #[test]
    fn sentinel_renders_as_bare_token() {
        assert_eq!(SqlValue::from_field("null"), SqlValue::Null);
        assert_eq!(SqlValue::Null.to_string(), "null");
    }

    #[test]
    fn parenthesized_fragment_stays_raw() {
        assert_eq!(
            SqlValue::from_field("(select 1)").to_string(),
            "(select 1)"
        );
    }
}
