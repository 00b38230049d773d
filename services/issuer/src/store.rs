//! SQLite-backed store for issued plates.
//!
//! This provides durable storage for every plate ever allocated, enabling
//! the allocation engine to rebuild its in-memory state after restarts.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use tracing::debug;

use platereg_plate::{Letter, PlateNumber};

/// Errors from plate store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid stored plate: {0}")]
    Invalid(String),
}

/// An issued plate as persisted, with its creation timestamp.
#[derive(Debug, Clone)]
pub struct PlateRecord {
    /// The plate value.
    pub plate: PlateNumber,
    /// Creation timestamp (Unix seconds), assigned at append time.
    pub created_at: i64,
}

/// SQLite plate store.
pub struct PlateStore {
    conn: Connection,
}

impl PlateStore {
    /// Open or create a plate store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        // Enable WAL mode for better concurrency
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self { conn };
        store.init_schema()?;

        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS issued_plates (
                letters    TEXT    NOT NULL,
                digits     INTEGER NOT NULL,
                region     TEXT    NOT NULL,
                created_at INTEGER NOT NULL,
                PRIMARY KEY (letters, digits, region)
            );",
        )?;
        Ok(())
    }

    /// Durably append a newly allocated plate, assigning its creation
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Fails if the plate identity already exists (the table's primary key
    /// backs the engine's duplicate-free guarantee) or on any SQLite fault.
    pub fn append(&self, plate: &PlateNumber) -> Result<PlateRecord, StoreError> {
        let created_at = chrono::Utc::now().timestamp();
        self.conn.execute(
            "INSERT INTO issued_plates (letters, digits, region, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                letters_column(plate),
                plate.digits(),
                plate.region(),
                created_at
            ],
        )?;

        debug!(plate = %plate, "Appended issued plate");

        Ok(PlateRecord {
            plate: plate.clone(),
            created_at,
        })
    }

    /// Load every issued plate. Used once at engine startup.
    pub fn load_all(&self) -> Result<Vec<PlateRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT letters, digits, region, created_at FROM issued_plates")?;

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(decode_row(row)?);
        }

        debug!(count = records.len(), "Loaded issued plates");

        Ok(records)
    }

    /// Load the most recently created plate, if any. Used once at engine
    /// startup as the seed for sequential generation.
    pub fn load_most_recent(&self) -> Result<Option<PlateRecord>, StoreError> {
        // rowid breaks ties between appends within the same second
        let raw = self
            .conn
            .query_row(
                "SELECT letters, digits, region, created_at FROM issued_plates
                 ORDER BY created_at DESC, rowid DESC LIMIT 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, u16>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                    ))
                },
            )
            .optional()?;

        raw.map(|(letters, digits, region, created_at)| {
            Ok(PlateRecord {
                plate: plate_from_columns(&letters, digits, &region)?,
                created_at,
            })
        })
        .transpose()
    }

    /// Check that the underlying database is reachable.
    pub fn health_check(&self) -> Result<(), StoreError> {
        self.conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}

/// The three plate letters as the stored column value.
fn letters_column(plate: &PlateNumber) -> String {
    plate.letters().iter().map(|l| l.as_char()).collect()
}

fn decode_row(row: &Row<'_>) -> Result<PlateRecord, StoreError> {
    let letters: String = row.get(0)?;
    let digits: u16 = row.get(1)?;
    let region: String = row.get(2)?;
    let created_at: i64 = row.get(3)?;

    Ok(PlateRecord {
        plate: plate_from_columns(&letters, digits, &region)?,
        created_at,
    })
}

fn plate_from_columns(
    letters: &str,
    digits: u16,
    region: &str,
) -> Result<PlateNumber, StoreError> {
    let symbols: Vec<Letter> = letters
        .chars()
        .map(|c| {
            Letter::from_char(c)
                .ok_or_else(|| StoreError::Invalid(format!("unknown letter '{c}' in '{letters}'")))
        })
        .collect::<Result<_, _>>()?;

    let [first, second, third] = symbols[..] else {
        return Err(StoreError::Invalid(format!(
            "expected 3 letters, got '{letters}'"
        )));
    };

    PlateNumber::new([first, second, third], digits, region)
        .map_err(|e| StoreError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate(s: &str) -> PlateNumber {
        PlateNumber::parse(s).unwrap()
    }

    #[test]
    fn append_and_load_roundtrip() {
        let store = PlateStore::open_in_memory().unwrap();

        let record = store.append(&plate("А123ВС 116 RUS")).unwrap();
        assert_eq!(record.plate, plate("А123ВС 116 RUS"));

        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].plate, plate("А123ВС 116 RUS"));
        assert_eq!(all[0].created_at, record.created_at);
    }

    #[test]
    fn load_most_recent_follows_creation_order() {
        let store = PlateStore::open_in_memory().unwrap();
        assert!(store.load_most_recent().unwrap().is_none());

        store.append(&plate("А001АА 116 RUS")).unwrap();
        store.append(&plate("А002АА 116 RUS")).unwrap();
        store.append(&plate("А003АА 116 RUS")).unwrap();

        let last = store.load_most_recent().unwrap().unwrap();
        assert_eq!(last.plate, plate("А003АА 116 RUS"));
    }

    #[test]
    fn append_rejects_duplicate_identity() {
        let store = PlateStore::open_in_memory().unwrap();
        store.append(&plate("А123ВС 116 RUS")).unwrap();

        let result = store.append(&plate("А123ВС 116 RUS"));
        assert!(matches!(result, Err(StoreError::Sqlite(_))));
    }

    #[test]
    fn same_number_in_other_region_is_distinct() {
        let store = PlateStore::open_in_memory().unwrap();
        store.append(&plate("А123ВС 116 RUS")).unwrap();
        store.append(&plate("А123ВС 78 RUS")).unwrap();

        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn corrupt_rows_surface_as_errors() {
        let store = PlateStore::open_in_memory().unwrap();
        // Latin letters cannot decode back into the plate alphabet
        store
            .conn
            .execute(
                "INSERT INTO issued_plates (letters, digits, region, created_at)
                 VALUES ('ABC', 42, '116 RUS', 0)",
                [],
            )
            .unwrap();

        assert!(matches!(store.load_all(), Err(StoreError::Invalid(_))));
        assert!(matches!(
            store.load_most_recent(),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn reopening_a_file_store_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plates.db");

        {
            let store = PlateStore::open(&path).unwrap();
            store.append(&plate("Е042КХ 116 RUS")).unwrap();
        }

        let store = PlateStore::open(&path).unwrap();
        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].plate, plate("Е042КХ 116 RUS"));
    }

    #[test]
    fn health_check_succeeds_on_open_store() {
        let store = PlateStore::open_in_memory().unwrap();
        store.health_check().unwrap();
    }
}
