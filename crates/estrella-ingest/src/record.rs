use std::fs::File;
use std::io::Read;
use std::path::Path;

use estrella_core::NULL_SENTINEL;

use crate::errors::IngestError;

/// Fixed field count of the source layout (header row included).
pub const SOURCE_FIELD_COUNT: usize = 14;

/// Expected header row of the source layout, for diagnostics and display.
pub const SOURCE_HEADERS: [&str; SOURCE_FIELD_COUNT] = [
    "Pais",
    "Codigo ISO pais",
    "Oficina de registro",
    "Continente",
    "Edad",
    "Area de conocimiento",
    "Especializacion",
    "Nivel academico",
    "Estado civil",
    "Genero",
    "Etnia",
    "Estatura",
    "Localizacion",
    "Cantidad de personas",
];

/// Raw marker for "unknown" in the numeric age/height fields.
const UNKNOWN_NUMERIC: &str = "-1";

/// One source row, reduced to the fields the pipeline consumes.
///
/// The source layout is positional: country name, ISO-3 country code,
/// registry office, a continent placeholder, age, knowledge area,
/// specialization, education level, a placeholder, gender, a placeholder,
/// height, a placeholder, person count. Placeholder fields are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemographicRecord {
    pub country_name: String,
    pub country_code: String,
    pub office: String,
    pub age: String,
    pub knowledge_area: String,
    pub specialization: String,
    pub education_level: String,
    pub gender: String,
    pub height: String,
    pub person_count: String,
}

impl DemographicRecord {
    /// Build a record from one CSV row. `row` is the 1-based data row
    /// number, used only for error reporting.
    pub fn from_csv(record: &csv::StringRecord, row: u64) -> Result<Self, IngestError> {
        if record.len() != SOURCE_FIELD_COUNT {
            return Err(IngestError::MalformedRecord {
                row,
                expected: SOURCE_FIELD_COUNT,
                got: record.len(),
            });
        }

        Ok(Self {
            country_name: record[0].to_string(),
            country_code: record[1].to_string(),
            office: record[2].to_string(),
            age: null_if_unknown(&record[4]),
            knowledge_area: record[5].to_string(),
            specialization: record[6].to_string(),
            education_level: record[7].to_string(),
            gender: record[9].to_string(),
            height: null_if_unknown(&record[11]),
            person_count: record[13].to_string(),
        })
    }
}

/// Sentinel numeric fields use `-1` for "unknown"; substitute the null
/// sentinel so they render as the bare `null` token.
fn null_if_unknown(field: &str) -> String {
    if field == UNKNOWN_NUMERIC {
        NULL_SENTINEL.to_string()
    } else {
        field.to_string()
    }
}

/// Streaming reader over the source CSV: skips the header row, yields one
/// [`DemographicRecord`] per data row.
pub struct RecordReader<R: Read> {
    inner: csv::StringRecordsIntoIter<R>,
    row: u64,
}

impl RecordReader<File> {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        Ok(Self::from_reader(File::open(path)?))
    }
}

impl<R: Read> RecordReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        Self {
            inner: reader.into_records(),
            row: 0,
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<DemographicRecord, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.inner.next()?;
        self.row += 1;
        Some(
            record
                .map_err(IngestError::from)
                .and_then(|record| DemographicRecord::from_csv(&record, self.row)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "pais,codigo,oficina,continente,edad,area,especializacion,nivel,x,genero,y,estatura,z,cantidad\n";

    #[test]
    fn parses_fixed_layout_and_skips_placeholders() {
        let csv = format!(
            "{HEADER}Colombia,COL,Bogota,-,30,Ingenieria,Sistemas,Pregrado,-,Femenino,-,170,-,2\n"
        );
        let mut reader = RecordReader::from_reader(csv.as_bytes());
        let record = reader.next().unwrap().unwrap();

        assert_eq!(record.country_code, "COL");
        assert_eq!(record.office, "Bogota");
        assert_eq!(record.age, "30");
        assert_eq!(record.height, "170");
        assert_eq!(record.person_count, "2");
        assert!(reader.next().is_none());
    }

    #[test]
    fn expected_headers_match_the_field_layout() {
        let csv = format!(
            "{}\nColombia,COL,Bogota,-,30,Ingenieria,Sistemas,Pregrado,-,Femenino,-,170,-,2\n",
            SOURCE_HEADERS.join(",")
        );
        let record = RecordReader::from_reader(csv.as_bytes())
            .next()
            .unwrap()
            .unwrap();

        assert_eq!(SOURCE_HEADERS[1], "Codigo ISO pais");
        assert_eq!(record.country_code, "COL");
        assert_eq!(SOURCE_HEADERS[2], "Oficina de registro");
        assert_eq!(record.office, "Bogota");
        assert_eq!(SOURCE_HEADERS[13], "Cantidad de personas");
        assert_eq!(record.person_count, "2");
    }

    #[test]
    fn unknown_numeric_becomes_sentinel() {
        let csv = format!(
            "{HEADER}Colombia,COL,Bogota,-,-1,Ingenieria,Sistemas,Pregrado,-,Femenino,-,-1,-,2\n"
        );
        let record = RecordReader::from_reader(csv.as_bytes())
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(record.age, "null");
        assert_eq!(record.height, "null");
    }

    #[test]
    fn quoted_fields_keep_embedded_delimiters() {
        let csv = format!(
            "{HEADER}Colombia,COL,\"Bogota, D.C.\",-,30,Ingenieria,Sistemas,Pregrado,-,Femenino,-,170,-,2\n"
        );
        let record = RecordReader::from_reader(csv.as_bytes())
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(record.office, "Bogota, D.C.");
    }

    #[test]
    fn short_row_is_malformed() {
        let csv = format!("{HEADER}Colombia,COL,Bogota\n");
        let result = RecordReader::from_reader(csv.as_bytes()).next().unwrap();
        assert!(matches!(
            result,
            Err(IngestError::MalformedRecord { row: 1, got: 3, .. })
        ));
    }
}
