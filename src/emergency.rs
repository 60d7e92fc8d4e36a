//! Emergency-numbers reference table
//!
//! Loads a country-keyed CSV of emergency contact numbers once at
//! startup. The table is immutable afterwards and lookups are total:
//! an unrecognized country yields the all-"Unknown" record rather than
//! an error.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::TripSightError;
use crate::models::EmergencyNumbers;
use crate::Result;

/// One row of the reference CSV. Header names follow the source dataset.
#[derive(Debug, Deserialize)]
struct ReferenceRecord {
    country: String,
    #[serde(rename = "ByCountry_police")]
    police: String,
    #[serde(rename = "ByCountry_ambulance")]
    ambulance: String,
    #[serde(rename = "ByCountry_fire")]
    fire: String,
}

/// Immutable country → emergency-numbers mapping
#[derive(Debug)]
pub struct ReferenceTable {
    numbers: HashMap<String, EmergencyNumbers>,
}

impl ReferenceTable {
    /// Load the table from a CSV file.
    ///
    /// Fails with `Load` when the file is missing or a row lacks the
    /// required columns; a service without reference data must not start.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            TripSightError::load(format!(
                "failed to open reference table {}: {e}",
                path.display()
            ))
        })?;

        let mut numbers = HashMap::new();
        for record in reader.deserialize() {
            let record: ReferenceRecord = record.map_err(|e| {
                TripSightError::load(format!(
                    "malformed row in reference table {}: {e}",
                    path.display()
                ))
            })?;
            numbers.insert(
                record.country,
                EmergencyNumbers {
                    police: record.police,
                    ambulance: record.ambulance,
                    fire: record.fire,
                },
            );
        }

        info!(
            "Loaded emergency numbers for {} countries from {}",
            numbers.len(),
            path.display()
        );
        Ok(Self { numbers })
    }

    /// Look up the numbers for a country. Total: unknown countries get
    /// the all-"Unknown" default.
    #[must_use]
    pub fn lookup(&self, country: &str) -> EmergencyNumbers {
        self.numbers
            .get(country)
            .cloned()
            .unwrap_or_else(EmergencyNumbers::unknown)
    }

    /// Number of countries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn test_load_and_lookup() {
        let file = write_csv(
            "country,ByCountry_police,ByCountry_ambulance,ByCountry_fire\n\
             France,17,15,18\n\
             Japan,110,119,119\n",
        );
        let table = ReferenceTable::load(file.path()).expect("load table");
        assert_eq!(table.len(), 2);

        let france = table.lookup("France");
        assert_eq!(france.police, "17");
        assert_eq!(france.ambulance, "15");
        assert_eq!(france.fire, "18");
    }

    #[test]
    fn test_unknown_country_defaults() {
        let file = write_csv(
            "country,ByCountry_police,ByCountry_ambulance,ByCountry_fire\n\
             France,17,15,18\n",
        );
        let table = ReferenceTable::load(file.path()).expect("load table");
        assert_eq!(table.lookup("Wakanda"), EmergencyNumbers::unknown());
    }

    #[test]
    fn test_missing_file_fails() {
        let result = ReferenceTable::load("does/not/exist.csv");
        assert!(matches!(result, Err(TripSightError::Load { .. })));
    }

    #[test]
    fn test_missing_column_fails() {
        let file = write_csv("country,ByCountry_police\nFrance,17\n");
        let result = ReferenceTable::load(file.path());
        assert!(matches!(result, Err(TripSightError::Load { .. })));
    }
}
