use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::statement::{InsertStatement, render_select};
use crate::value::SqlValue;
use crate::{INVALID_VALUES, NULL_SENTINEL};

/// What a natural key resolves to: a surrogate id or the null sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedId {
    Id(i64),
    Null,
}

impl From<ResolvedId> for SqlValue {
    fn from(resolved: ResolvedId) -> Self {
        match resolved {
            ResolvedId::Id(id) => SqlValue::Int(id),
            ResolvedId::Null => SqlValue::Null,
        }
    }
}

/// One relational table: column layout, dedup cache, and (optionally) a
/// monotonically increasing surrogate-key counter.
///
/// Instances live for the duration of one load run. The cache maps each
/// distinct natural-key value to the surrogate id it was assigned on first
/// sight; invalid markers and the sentinel literal itself are pre-seeded to
/// resolve to the sentinel so they never become rows. A source field whose
/// value is exactly the sentinel literal is therefore indistinguishable from
/// a missing value, by design of the statement format.
#[derive(Debug, Clone)]
pub struct TableModel {
    name: String,
    columns: Vec<String>,
    identifier_index: usize,
    next_id: Option<i64>,
    cache: HashMap<String, ResolvedId>,
}

impl TableModel {
    /// `identifier` names the column whose value decides dedup (the natural
    /// key). `surrogate_key` declares whether column 0 is an auto-increment
    /// id owned by this model.
    pub fn new(name: &str, columns: &[&str], identifier: &str, surrogate_key: bool) -> Result<Self> {
        let identifier_index = columns
            .iter()
            .position(|column| *column == identifier)
            .ok_or_else(|| {
                Error::Contract(format!(
                    "identifier '{identifier}' is not a column of \"{name}\""
                ))
            })?;

        let mut cache = HashMap::new();
        for invalid in INVALID_VALUES {
            cache.insert((*invalid).to_string(), ResolvedId::Null);
        }
        cache.insert(NULL_SENTINEL.to_string(), ResolvedId::Null);

        Ok(Self {
            name: name.to_string(),
            columns: columns.iter().map(|column| column.to_string()).collect(),
            identifier_index,
            next_id: if surrogate_key { Some(0) } else { None },
            cache,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Register one row. `values` aligns to `columns`, minus the surrogate
    /// column when this table owns one.
    ///
    /// Returns `None` when the natural key is already cached (or pre-seeded
    /// invalid): no statement, no counter change. Otherwise the surrogate id
    /// (if any) is assigned in first-seen order starting at 0, the key is
    /// cached, and the rendered insert descriptor is returned.
    pub fn insert(&mut self, values: Vec<SqlValue>) -> Result<Option<InsertStatement>> {
        let Some(next_id) = self.next_id else {
            if self.cache.contains_key(&self.natural_key(&values)?) {
                return Ok(None);
            }
            return Ok(Some(InsertStatement::new(&self.name, &self.columns, values)?));
        };

        let mut row = Vec::with_capacity(values.len() + 1);
        row.push(SqlValue::Int(next_id));
        row.extend(values);

        let key = self.natural_key(&row)?;
        if self.cache.contains_key(&key) {
            return Ok(None);
        }

        self.next_id = Some(next_id + 1);
        self.cache.insert(key, ResolvedId::Id(next_id));
        Ok(Some(InsertStatement::new(&self.name, &self.columns, row)?))
    }

    /// Look up the surrogate id (or sentinel) for a natural-key value.
    ///
    /// Callers must only resolve values they just inserted or that are
    /// pre-seeded as invalid; anything else is an ordering bug upstream.
    pub fn resolve(&self, key: &str) -> Result<ResolvedId> {
        self.cache.get(key).copied().ok_or_else(|| Error::UnknownKey {
            table: self.name.clone(),
            key: key.to_string(),
        })
    }

    /// SELECT over every column of this table, with raw trailing filters.
    pub fn select_all(&self, filters: &[String]) -> String {
        render_select(&format!("\"{}\"", self.name), "*", filters)
    }

    fn natural_key(&self, row: &[SqlValue]) -> Result<String> {
        if row.len() != self.columns.len() {
            return Err(Error::Contract(format!(
                "insert into \"{}\": expected {} values, got {}",
                self.name,
                self.columns.len(),
                row.len()
            )));
        }
        // Keyed on the exact source spelling: `Number` keeps its raw form,
        // so "07" and "7" stay distinct keys.
        let key = match &row[self.identifier_index] {
            SqlValue::Int(value) => value.to_string(),
            SqlValue::Number(value) | SqlValue::Text(value) | SqlValue::Raw(value) => value.clone(),
            SqlValue::Null => NULL_SENTINEL.to_string(),
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> TableModel {
        TableModel::new(
            "Pais",
            &["id", "id_Continente", "codigo", "nombre"],
            "codigo",
            true,
        )
        .unwrap()
    }

    fn insert_country(table: &mut TableModel, code: &str, name: &str) -> Option<InsertStatement> {
        table
            .insert(vec![
                SqlValue::Int(0),
                SqlValue::Text(code.to_string()),
                SqlValue::Text(name.to_string()),
            ])
            .unwrap()
    }

    #[test]
    fn ids_are_assigned_in_first_seen_order() {
        let mut table = countries();

        let first = insert_country(&mut table, "COL", "Colombia").expect("new row");
        let second = insert_country(&mut table, "ECU", "Ecuador").expect("new row");

        assert_eq!(first.values[0], SqlValue::Int(0));
        assert_eq!(second.values[0], SqlValue::Int(1));
        assert_eq!(table.resolve("COL").unwrap(), ResolvedId::Id(0));
        assert_eq!(table.resolve("ECU").unwrap(), ResolvedId::Id(1));
    }

    #[test]
    fn repeated_key_is_a_noop() {
        let mut table = countries();

        insert_country(&mut table, "COL", "Colombia").expect("new row");
        assert!(insert_country(&mut table, "COL", "Colombia").is_none());

        // Counter untouched; the next distinct key still gets id 1.
        let next = insert_country(&mut table, "PER", "Peru").expect("new row");
        assert_eq!(next.values[0], SqlValue::Int(1));
    }

    #[test]
    fn statement_count_equals_distinct_valid_keys() {
        let mut table = countries();
        let feed = ["COL", "PER", "COL", "NO INDICA", "PER", "ECU"];

        let statements: Vec<_> = feed
            .iter()
            .filter_map(|code| insert_country(&mut table, code, "x"))
            .collect();

        assert_eq!(statements.len(), 3);
    }

    #[test]
    fn invalid_markers_resolve_to_sentinel_and_never_insert() {
        let mut table = countries();

        assert!(insert_country(&mut table, "NO INDICA", "x").is_none());
        assert!(insert_country(&mut table, "(NO REGISTRA)", "x").is_none());
        assert!(insert_country(&mut table, "null", "x").is_none());

        assert_eq!(table.resolve("NO INDICA").unwrap(), ResolvedId::Null);
        assert_eq!(table.resolve("null").unwrap(), ResolvedId::Null);
    }

    #[test]
    fn numeric_looking_keys_resolve_by_exact_spelling() {
        let mut table = TableModel::new("OficinaRegistro", &["id", "id_Pais", "nombre"], "nombre", true)
            .unwrap();

        let insert_office = |table: &mut TableModel, name: &str| {
            table
                .insert(vec![SqlValue::Int(0), SqlValue::from_field(name)])
                .unwrap()
        };

        let first = insert_office(&mut table, "007").expect("new row");
        assert!(first.to_sql().contains("VALUES (0,0,007);"), "{}", first.to_sql());

        // Distinct spellings of the same number are distinct keys.
        let second = insert_office(&mut table, "07").expect("new row");
        assert_eq!(second.values[0], SqlValue::Int(1));
        let third = insert_office(&mut table, "7").expect("new row");
        assert_eq!(third.values[0], SqlValue::Int(2));

        assert_eq!(table.resolve("007").unwrap(), ResolvedId::Id(0));
        assert_eq!(table.resolve("07").unwrap(), ResolvedId::Id(1));
        assert_eq!(table.resolve("7").unwrap(), ResolvedId::Id(2));
    }

    #[test]
    fn unseen_key_is_an_error() {
        let table = countries();
        assert!(matches!(
            table.resolve("ZZZ"),
            Err(Error::UnknownKey { .. })
        ));
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let mut table = countries();
        let result = table.insert(vec![SqlValue::Int(0)]);
        assert!(matches!(result, Err(Error::Contract(_))));
    }

    #[test]
    fn unknown_identifier_column_is_rejected() {
        assert!(TableModel::new("Genero", &["id", "nombre"], "codigo", true).is_err());
    }
}
