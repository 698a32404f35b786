use std::fmt;

use crate::error::{Error, Result};
use crate::value::SqlValue;

/// A structured insert descriptor, deferred to execution time.
///
/// Statements are accumulated during a load run and rendered in one batch,
/// replacing ad-hoc string concatenation as the queue format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<SqlValue>,
}

impl InsertStatement {
    pub fn new(table: &str, columns: &[String], values: Vec<SqlValue>) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(Error::Contract(format!(
                "insert into \"{}\": {} columns but {} values",
                table,
                columns.len(),
                values.len()
            )));
        }
        Ok(Self {
            table: table.to_string(),
            columns: columns.to_vec(),
            values,
        })
    }

    /// Render one terminated statement:
    /// `INSERT INTO "T"("a","b") VALUES (1,'x');`
    pub fn to_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| format!("\"{column}\""))
            .collect::<Vec<_>>()
            .join(",");
        let values = self
            .values
            .iter()
            .map(SqlValue::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!("INSERT INTO \"{}\"({}) VALUES ({});", self.table, columns, values)
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

/// Render a SELECT over an arbitrary FROM clause.
///
/// `filters` are raw ordered clause fragments (`"order by 1"`, `"limit 15"`)
/// appended verbatim after the FROM clause, space-joined and unvalidated.
pub fn render_select(from_clause: &str, columns: &str, filters: &[String]) -> String {
    let mut sql = format!("SELECT {columns} FROM {from_clause}");
    for filter in filters {
        sql.push(' ');
        sql.push_str(filter);
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_typed_values() {
        let statement = InsertStatement::new(
            "Pais",
            &[
                "id".to_string(),
                "id_Continente".to_string(),
                "codigo".to_string(),
                "nombre".to_string(),
            ],
            vec![
                SqlValue::Int(0),
                SqlValue::Int(0),
                SqlValue::Text("COL".to_string()),
                SqlValue::Text("Colombia".to_string()),
            ],
        )
        .unwrap();

        assert_eq!(
            statement.to_sql(),
            "INSERT INTO \"Pais\"(\"id\",\"id_Continente\",\"codigo\",\"nombre\") \
             VALUES (0,0,'COL','Colombia');"
        );
    }

    #[test]
    fn arity_mismatch_is_a_contract_violation() {
        let result = InsertStatement::new(
            "Genero",
            &["id".to_string(), "nombre".to_string()],
            vec![SqlValue::Int(0)],
        );
        assert!(matches!(result, Err(Error::Contract(_))));
    }

    #[test]
    fn select_appends_filters_in_order() {
        let sql = render_select(
            "\"Continente\"",
            "*",
            &["order by 1".to_string(), "limit 15".to_string()],
        );
        assert_eq!(sql, "SELECT * FROM \"Continente\" order by 1 limit 15");
    }
}
