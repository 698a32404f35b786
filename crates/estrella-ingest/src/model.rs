use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Summary of one load run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    /// Data rows read from the source.
    pub rows_read: u64,
    /// Insert statements emitted per table.
    pub inserts_by_table: BTreeMap<String, u64>,
    /// Total statements in the executed batch.
    pub statements_total: u64,
    pub duration_ms: u64,
}

impl LoadReport {
    pub fn new() -> Self {
        Self {
            rows_read: 0,
            inserts_by_table: BTreeMap::new(),
            statements_total: 0,
            duration_ms: 0,
        }
    }

    pub fn record_insert(&mut self, table: &str) {
        *self.inserts_by_table.entry(table.to_string()).or_insert(0) += 1;
        self.statements_total += 1;
    }

    pub fn write_json(&self, path: &Path) -> Result<(), crate::IngestError> {
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}

impl Default for LoadReport {
    fn default() -> Self {
        Self::new()
    }
}
