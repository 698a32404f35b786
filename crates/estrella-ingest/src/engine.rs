use std::time::Instant;

use tracing::info;

use estrella_core::{
    INVALID_VALUES, InsertStatement, NULL_SENTINEL, SchemaRegistry, SqlValue, TableRole,
};

use crate::continent::{ContinentLookup, continent_name};
use crate::errors::IngestError;
use crate::model::LoadReport;
use crate::record::DemographicRecord;
use crate::store::SqlStore;

/// Country codes with no ISO mapping at all; they resolve to the sentinel.
const UNMAPPED_COUNTRY_CODES: &[&str] = &["DDD"];

/// Single-shot batch loader: check preconditions, scan, accumulate, execute once.
pub struct InsertionEngine<'a> {
    store: &'a dyn SqlStore,
    lookup: &'a dyn ContinentLookup,
}

impl<'a> InsertionEngine<'a> {
    pub fn new(store: &'a dyn SqlStore, lookup: &'a dyn ContinentLookup) -> Self {
        Self { store, lookup }
    }

    /// Run one load: every target table must be empty, then each source row
    /// is inserted into every table in dependency order, and the whole
    /// accumulated batch is executed as one unit.
    ///
    /// If the batch fails at execution time nothing is retried and the
    /// caller must not assume any row was persisted.
    pub async fn run<I>(
        &self,
        registry: &mut SchemaRegistry,
        records: I,
    ) -> Result<LoadReport, IngestError>
    where
        I: IntoIterator<Item = Result<DemographicRecord, IngestError>>,
    {
        let start = Instant::now();
        self.check_tables_empty(registry).await?;

        info!("load started");

        let mut report = LoadReport::new();
        let mut batch: Vec<InsertStatement> = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let record = record?;
            let row = index as u64 + 1;
            report.rows_read += 1;
            insert_row(registry, self.lookup, &record, row, &mut batch, &mut report)?;
        }

        let sql = batch
            .iter()
            .map(InsertStatement::to_sql)
            .collect::<Vec<_>>()
            .join("\n");
        if !sql.is_empty() {
            self.store.execute_batch(&sql).await?;
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            rows = report.rows_read,
            statements = report.statements_total,
            duration_ms = report.duration_ms,
            "load completed"
        );

        Ok(report)
    }

    /// The precondition check: one `limit 1` select per table, before any
    /// row is read.
    async fn check_tables_empty(&self, registry: &SchemaRegistry) -> Result<(), IngestError> {
        for role in TableRole::ALL {
            let table = registry.table(role);
            let sql = table.select_all(&["limit 1".to_string()]);
            let rows = self.store.fetch_rows(&sql).await?;
            if !rows.is_empty() {
                return Err(IngestError::TablesNotEmpty {
                    table: table.name().to_string(),
                });
            }
        }
        Ok(())
    }
}

/// The country code actually cached plus the continent it maps to, after
/// special-casing.
struct CountryDerivation {
    country_code: String,
    continent_code: String,
}

fn derive_country(
    lookup: &dyn ContinentLookup,
    raw_code: &str,
    row: u64,
) -> Result<CountryDerivation, IngestError> {
    if UNMAPPED_COUNTRY_CODES.contains(&raw_code) || INVALID_VALUES.contains(&raw_code) {
        return Ok(CountryDerivation {
            country_code: raw_code.to_string(),
            continent_code: NULL_SENTINEL.to_string(),
        });
    }

    // Sint Maarten appears in the source as a bare "SX"; hard-map it and
    // store the alpha-3 form.
    if raw_code == "SX" {
        return Ok(CountryDerivation {
            country_code: "SXM".to_string(),
            continent_code: "NA".to_string(),
        });
    }

    let continent = lookup
        .continent_code(raw_code)
        .ok_or_else(|| IngestError::UnknownCountry {
            row,
            code: raw_code.to_string(),
        })?;
    Ok(CountryDerivation {
        country_code: raw_code.to_string(),
        continent_code: continent.to_string(),
    })
}

/// Insert one source row into every table, parents before children, pushing
/// each genuinely new statement onto the batch. Foreign keys are resolved
/// from the parent caches using the same natural keys just registered.
fn insert_row(
    registry: &mut SchemaRegistry,
    lookup: &dyn ContinentLookup,
    record: &DemographicRecord,
    row: u64,
    batch: &mut Vec<InsertStatement>,
    report: &mut LoadReport,
) -> Result<(), IngestError> {
    let derived = derive_country(lookup, &record.country_code, row)?;

    for role in registry.insertion_order().to_vec() {
        let values = match role {
            TableRole::Continente => vec![
                SqlValue::from_field(&derived.continent_code),
                continent_name(&derived.continent_code)
                    .map(|name| SqlValue::Text(name.to_string()))
                    .unwrap_or(SqlValue::Null),
            ],
            TableRole::Pais => vec![
                registry
                    .table(TableRole::Continente)
                    .resolve(&derived.continent_code)?
                    .into(),
                SqlValue::from_field(&derived.country_code),
                SqlValue::from_field(&record.country_name),
            ],
            TableRole::OficinaRegistro => vec![
                registry
                    .table(TableRole::Pais)
                    .resolve(&derived.country_code)?
                    .into(),
                SqlValue::from_field(&record.office),
            ],
            TableRole::AreaConocimiento => {
                vec![SqlValue::from_field(&record.knowledge_area)]
            }
            TableRole::Especializacion => vec![
                SqlValue::from_field(&record.specialization),
                registry
                    .table(TableRole::AreaConocimiento)
                    .resolve(&record.knowledge_area)?
                    .into(),
            ],
            TableRole::NivelAcademico => {
                vec![SqlValue::from_field(&record.education_level)]
            }
            TableRole::Genero => vec![SqlValue::from_field(&record.gender)],
            TableRole::DescripcionDemografica => vec![
                registry
                    .table(TableRole::OficinaRegistro)
                    .resolve(&record.office)?
                    .into(),
                registry
                    .table(TableRole::NivelAcademico)
                    .resolve(&record.education_level)?
                    .into(),
                registry
                    .table(TableRole::Especializacion)
                    .resolve(&record.specialization)?
                    .into(),
                registry
                    .table(TableRole::Genero)
                    .resolve(&record.gender)?
                    .into(),
                SqlValue::from_field(&record.age),
                SqlValue::from_field(&record.height),
                SqlValue::from_field(&record.person_count),
            ],
        };

        if let Some(statement) = registry.table_mut(role).insert(values)? {
            report.record_insert(role.table_name());
            batch.push(statement);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continent::IsoContinentTable;

    #[test]
    fn special_cased_code_skips_the_lookup() {
        struct NoLookup;
        impl ContinentLookup for NoLookup {
            fn continent_code(&self, _iso3: &str) -> Option<&'static str> {
                panic!("lookup must not be consulted for special-cased codes")
            }
        }

        let derived = derive_country(&NoLookup, "SX", 1).unwrap();
        assert_eq!(derived.country_code, "SXM");
        assert_eq!(derived.continent_code, "NA");
    }

    #[test]
    fn unmapped_and_invalid_codes_get_the_sentinel() {
        let table = IsoContinentTable;
        let ddd = derive_country(&table, "DDD", 1).unwrap();
        assert_eq!(ddd.continent_code, NULL_SENTINEL);
        assert_eq!(ddd.country_code, "DDD");

        let invalid = derive_country(&table, "NO INDICA", 1).unwrap();
        assert_eq!(invalid.continent_code, NULL_SENTINEL);
    }

    #[test]
    fn unknown_code_is_an_error() {
        let result = derive_country(&IsoContinentTable, "QQQ", 7);
        assert!(matches!(
            result,
            Err(IngestError::UnknownCountry { row: 7, .. })
        ));
    }
}
