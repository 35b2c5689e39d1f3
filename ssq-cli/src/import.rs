use anyhow::{Context, Result};
use ssq_db::rusqlite::Connection;
use std::path::Path;
use tracing::warn;

use ssq_db::db::insert_draw;
use ssq_db::loader::parse_history_entries;

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_json(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot open {:?}", path))?;
    let entries = parse_history_entries(&text)
        .with_context(|| format!("cannot parse {:?}", path))?;

    let tx = conn.unchecked_transaction()
        .context("cannot start transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for entry in entries {
        result.total_records += 1;
        match entry {
            Ok(draw) => {
                match insert_draw(&tx, &draw) {
                    Ok(true) => result.inserted += 1,
                    Ok(false) => result.skipped += 1,
                    Err(e) => {
                        warn!(record = result.total_records, issue = %draw.issue, error = %e, "insert failed");
                        result.errors += 1;
                    }
                }
            }
            Err(e) => {
                warn!(record = result.total_records, error = %e, "record rejected");
                result.errors += 1;
            }
        }
    }

    tx.commit().context("commit failed")?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssq_db::db::{count_draws, fetch_all_draws, migrate};

    const HISTORY: &str = r#"[
      {"issue": "2025059", "openTime": "2025-05-27", "frontWinningNum": "04 10 11 12 13 24", "backWinningNum": "01"},
      {"issue": "2025058", "openTime": "2025-05-25", "frontWinningNum": "02 06 07 09 10 20", "backWinningNum": "06"},
      {"issue": "2025057", "openTime": "2025-05-22", "frontWinningNum": "04 09 15 16 25 40", "backWinningNum": "14"}
    ]"#;

    #[test]
    fn test_import_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, HISTORY).unwrap();

        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let result = import_json(&conn, &path).unwrap();
        assert_eq!(result.total_records, 3);
        assert_eq!(result.inserted, 2);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.errors, 1);

        let again = import_json(&conn, &path).unwrap();
        assert_eq!(again.inserted, 0);
        assert_eq!(again.skipped, 2);
        assert_eq!(count_draws(&conn).unwrap(), 2);

        let draws = fetch_all_draws(&conn).unwrap();
        assert_eq!(draws[0].issue, "2025059");
    }

    #[test]
    fn test_import_missing_file() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert!(import_json(&conn, Path::new("does/not/exist.json")).is_err());
    }
}
