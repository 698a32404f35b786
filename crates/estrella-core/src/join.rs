use crate::error::{Error, Result};
use crate::table::TableModel;

/// Which columns of a (possibly joined) projection to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    All,
    /// Contiguous range over the qualified column list; `end` of `None`
    /// means "to the end".
    Range { start: usize, end: Option<usize> },
    /// Explicit positions over the qualified column list.
    Indices(Vec<usize>),
    /// Explicit unqualified column names, resolved in order.
    Names(Vec<String>),
}

/// The pieces needed to read a root table joined with its parents.
#[derive(Debug, Clone)]
pub struct JoinClause {
    /// FROM clause starting at the root, one JOIN per related table.
    pub from_clause: String,
    /// Flat column names across root + joined tables.
    pub columns: Vec<String>,
    /// Same columns qualified as `"Table"."column"`, for projection and
    /// display headers.
    pub qualified_columns: Vec<String>,
}

impl JoinClause {
    /// Resolve a selection into the qualified columns to project.
    pub fn select_columns(&self, selection: &ColumnSelection) -> Result<Vec<String>> {
        match selection {
            ColumnSelection::All => Ok(self.qualified_columns.clone()),
            ColumnSelection::Range { start, end } => {
                let end = end.unwrap_or(self.qualified_columns.len());
                if *start > end || end > self.qualified_columns.len() {
                    return Err(Error::Contract(format!(
                        "column range {start}..{end} out of bounds for {} columns",
                        self.qualified_columns.len()
                    )));
                }
                Ok(self.qualified_columns[*start..end].to_vec())
            }
            ColumnSelection::Indices(indices) => indices
                .iter()
                .map(|index| {
                    self.qualified_columns.get(*index).cloned().ok_or_else(|| {
                        Error::Contract(format!(
                            "column index {index} out of bounds for {} columns",
                            self.qualified_columns.len()
                        ))
                    })
                })
                .collect(),
            ColumnSelection::Names(names) => names
                .iter()
                .map(|name| {
                    self.columns
                        .iter()
                        .position(|column| column == name)
                        .map(|index| self.qualified_columns[index].clone())
                        .ok_or_else(|| Error::Contract(format!("unknown column '{name}'")))
                })
                .collect(),
        }
    }
}

/// Build the FROM clause and projections for `root` joined with `tables`.
///
/// Each joined table contributes exactly one implicit equality join,
/// `"<T>"."id" = "<root>"."id_<T>"`, in the order supplied.
pub fn compose_join(root: &TableModel, tables: &[&TableModel]) -> JoinClause {
    let mut from_clause = format!("\"{}\"", root.name());
    let mut columns: Vec<String> = root.columns().to_vec();
    let mut qualified_columns: Vec<String> = root
        .columns()
        .iter()
        .map(|column| format!("\"{}\".\"{}\"", root.name(), column))
        .collect();

    for table in tables {
        from_clause.push_str(&format!(
            " JOIN \"{t}\" ON (\"{t}\".\"id\" = \"{root}\".\"id_{t}\")",
            t = table.name(),
            root = root.name()
        ));
        columns.extend(table.columns().iter().cloned());
        qualified_columns.extend(
            table
                .columns()
                .iter()
                .map(|column| format!("\"{}\".\"{}\"", table.name(), column)),
        );
    }

    JoinClause {
        from_clause,
        columns,
        qualified_columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, columns: &[&str]) -> TableModel {
        TableModel::new(name, columns, columns[0], true).unwrap()
    }

    #[test]
    fn one_join_per_related_table_in_supplied_order() {
        let root = table("Pais", &["id", "id_Continente", "codigo"]);
        let continent = table("Continente", &["id", "codigo"]);

        let join = compose_join(&root, &[&continent]);
        assert_eq!(
            join.from_clause,
            "\"Pais\" JOIN \"Continente\" ON (\"Continente\".\"id\" = \"Pais\".\"id_Continente\")"
        );
        assert_eq!(join.columns.len(), 5);
        assert_eq!(join.qualified_columns[3], "\"Continente\".\"id\"");
    }

    #[test]
    fn join_shape_with_two_tables() {
        let root = table("R", &["id", "id_A", "id_B"]);
        let a = table("A", &["id"]);
        let b = table("B", &["id"]);

        let join = compose_join(&root, &[&a, &b]);
        let joins: Vec<_> = join.from_clause.match_indices(" JOIN ").collect();
        assert_eq!(joins.len(), 2);
        let a_at = join.from_clause.find("\"A\".\"id\" = \"R\".\"id_A\"").unwrap();
        let b_at = join.from_clause.find("\"B\".\"id\" = \"R\".\"id_B\"").unwrap();
        assert!(a_at < b_at);
    }

    #[test]
    fn range_and_name_selection() {
        let root = table("Pais", &["id", "codigo", "nombre"]);
        let join = compose_join(&root, &[]);

        let range = join
            .select_columns(&ColumnSelection::Range { start: 1, end: Some(3) })
            .unwrap();
        assert_eq!(range, vec!["\"Pais\".\"codigo\"", "\"Pais\".\"nombre\""]);

        let named = join
            .select_columns(&ColumnSelection::Names(vec!["nombre".to_string()]))
            .unwrap();
        assert_eq!(named, vec!["\"Pais\".\"nombre\""]);

        assert!(join
            .select_columns(&ColumnSelection::Indices(vec![9]))
            .is_err());
    }
}
