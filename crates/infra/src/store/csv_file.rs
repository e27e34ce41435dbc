use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ewaste_ledger::{Entry, Ledger};

use super::r#trait::{LedgerStore, LedgerStoreError};

/// Column names, in file order.
pub const HEADER: [&str; 3] = ["Item", "Quantity", "CO2_Saved"];

/// On-disk row shape. No index column is written.
#[derive(Debug, Serialize, Deserialize)]
struct EntryRow {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Quantity")]
    quantity: i64,
    #[serde(rename = "CO2_Saved")]
    co2_saved: f64,
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            item: entry.item().to_string(),
            quantity: entry.quantity().to_i64(),
            co2_saved: entry.co2_saved(),
        }
    }
}

/// Ledger stored as a CSV file with an `Item,Quantity,CO2_Saved` header.
///
/// Saves write a sibling temp file and rename it over the target, so a crash
/// mid-save leaves either the old file or the new one.
#[derive(Debug, Clone)]
pub struct CsvFileLedgerStore {
    path: PathBuf,
}

impl CsvFileLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ledger.csv".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn csv_error(&self, source: csv::Error) -> LedgerStoreError {
        LedgerStoreError::Csv {
            path: self.path.clone(),
            source,
        }
    }

    fn write_rows(&self, target: &Path, ledger: &Ledger) -> Result<(), LedgerStoreError> {
        let file = File::create(target).map_err(|e| LedgerStoreError::io("create", target, e))?;

        // Header is written by hand so an empty ledger still gets one.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.write_record(HEADER).map_err(|e| self.csv_error(e))?;
        for entry in ledger.iter() {
            writer
                .serialize(EntryRow::from(entry))
                .map_err(|e| self.csv_error(e))?;
        }
        writer
            .flush()
            .map_err(|e| LedgerStoreError::io("write", target, e))?;

        let file = writer.into_inner().map_err(|e| {
            let err = e.error();
            LedgerStoreError::io("write", target, io::Error::new(err.kind(), err.to_string()))
        })?;
        file.sync_all()
            .map_err(|e| LedgerStoreError::io("sync", target, e))
    }
}

impl LedgerStore for CsvFileLedgerStore {
    fn load(&self) -> Result<Ledger, LedgerStoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no ledger file yet; starting empty");
                return Ok(Ledger::new());
            }
            Err(err) => return Err(LedgerStoreError::io("open", &self.path, err)),
        };

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers = reader.headers().map_err(|e| self.csv_error(e))?.clone();
        if headers.is_empty() {
            // Zero-byte file.
            return Ok(Ledger::new());
        }
        if headers.iter().ne(HEADER.iter().copied()) {
            return Err(LedgerStoreError::Corrupt {
                path: self.path.clone(),
                line: 1,
                reason: format!(
                    "expected header {:?}, found {:?}",
                    HEADER,
                    headers.iter().collect::<Vec<_>>()
                ),
            });
        }

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.csv_error(e))?;
            // 1-based file line; the header is line 1.
            let line = record.position().map_or(0, |p| p.line());
            let row: EntryRow = record
                .deserialize(Some(&headers))
                .map_err(|e| self.csv_error(e))?;
            let entry = Entry::restore(row.item, row.quantity, row.co2_saved).map_err(|e| {
                LedgerStoreError::Corrupt {
                    path: self.path.clone(),
                    line,
                    reason: e.to_string(),
                }
            })?;
            entries.push(entry);
        }

        tracing::debug!(path = %self.path.display(), rows = entries.len(), "loaded ledger");
        Ok(Ledger::from_entries(entries))
    }

    fn save(&self, ledger: &Ledger) -> Result<(), LedgerStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| LedgerStoreError::io("create directory for", &self.path, e))?;
        }

        let temp = self.temp_path();
        if let Err(err) = self.write_rows(&temp, ledger) {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }
        fs::rename(&temp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            LedgerStoreError::io("replace", &self.path, e)
        })?;

        tracing::debug!(path = %self.path.display(), rows = ledger.len(), "saved ledger");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CsvFileLedgerStore {
        CsvFileLedgerStore::new(dir.path().join("ewaste_data.csv"))
    }

    fn sample_ledger() -> Ledger {
        Ledger::from_entries(vec![
            Entry::restore("Laptop", 2, 25.0).unwrap(),
            Entry::restore("Mobile Phone", 3, 12.600000000000001).unwrap(),
            Entry::restore("Charger", 1, 0.5).unwrap(),
        ])
    }

    #[test]
    fn missing_file_loads_as_empty_ledger() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let ledger = store.load().unwrap();

        assert!(ledger.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn round_trip_preserves_order_and_full_precision() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let ledger = sample_ledger();

        store.save(&ledger).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, ledger);
        assert_eq!(loaded.entries()[1].co2_saved(), 12.600000000000001);
    }

    #[test]
    fn empty_ledger_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&Ledger::new()).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.trim_end(), "Item,Quantity,CO2_Saved");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn file_layout_has_three_named_columns() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store
            .save(&Ledger::from_entries(vec![Entry::restore("Laptop", 2, 25.0).unwrap()]))
            .unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["Item,Quantity,CO2_Saved", "Laptop,2,25.0"]);
    }

    #[test]
    fn reads_files_written_by_other_tools() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "Item,Quantity,CO2_Saved\nKeyboard,4,4.4\n\"Mobile Phone\",1,4.2\n",
        )
        .unwrap();

        let ledger = store.load().unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[1].item(), "Mobile Phone");
        assert_eq!(ledger.total_saved(), 4.4 + 4.2);
    }

    #[test]
    fn zero_byte_file_loads_as_empty_ledger() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "").unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn wrong_header_is_reported_as_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Name,Count\nLaptop,1\n").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, LedgerStoreError::Corrupt { line: 1, .. }));
    }

    #[test]
    fn invalid_quantity_is_reported_with_file_line() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "Item,Quantity,CO2_Saved\nLaptop,1,12.5\nCharger,0,0.0\n",
        )
        .unwrap();

        let err = store.load().unwrap_err();
        match err {
            LedgerStoreError::Corrupt { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("quantity"));
            }
            other => panic!("expected corrupt row, got {other:?}"),
        }
    }

    #[test]
    fn first_data_row_is_not_confused_with_header() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Item,Quantity,CO2_Saved
,1,12.5
").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, LedgerStoreError::Corrupt { line: 2, .. }));
        assert!(err.to_string().contains("at line 2"));
    }

    #[test]
    fn quantities_beyond_u32_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let ledger =
            Ledger::from_entries(vec![Entry::restore("Laptop", 5_000_000_000, 62_500_000_000.0).unwrap()]);

        store.save(&ledger).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(contents.contains("Laptop,5000000000,"));
        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn unparsable_number_is_a_csv_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Item,Quantity,CO2_Saved\nLaptop,two,25.0\n").unwrap();

        assert!(matches!(store.load().unwrap_err(), LedgerStoreError::Csv { .. }));
    }

    #[test]
    fn save_creates_missing_parent_directories_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = CsvFileLedgerStore::new(dir.path().join("nested/data/ledger.csv"));

        store.save(&sample_ledger()).unwrap();

        assert!(store.path().exists());
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().unwrap(), sample_ledger());
    }

    #[test]
    fn save_over_a_directory_fails_with_io_error() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();
        let store = CsvFileLedgerStore::new(&target);

        let err = store.save(&sample_ledger()).unwrap_err();

        assert!(matches!(err, LedgerStoreError::Io { op: "replace", .. }));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&sample_ledger()).unwrap();
        let shorter = Ledger::from_entries(vec![Entry::restore("Headphone", 2, 1.4).unwrap()]);
        store.save(&shorter).unwrap();

        assert_eq!(store.load().unwrap(), shorter);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: whatever is saved loads back identically, in order.
        #[test]
        fn any_ledger_round_trips(
            rows in prop::collection::vec(("[A-Za-z ,\"]{1,12}", 1i64..1_000, 0.0f64..10_000.0), 0..25)
        ) {
            prop_assume!(rows.iter().all(|(item, _, _)| !item.trim().is_empty()));
            let ledger = Ledger::from_entries(
                rows.into_iter()
                    .map(|(item, qty, co2)| Entry::restore(item, qty, co2).unwrap())
                    .collect(),
            );
            let dir = TempDir::new().unwrap();
            let store = store_in(&dir);

            store.save(&ledger).unwrap();
            prop_assert_eq!(store.load().unwrap(), ledger);
        }
    }
}
