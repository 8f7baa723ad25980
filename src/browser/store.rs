//! Cookie row store access
//!
//! Opens a snapshot as a Chromium cookie database and runs the one fixed
//! read-only projection over the `cookies` table. Rows come back in
//! whatever order SQLite yields them; nothing downstream depends on it.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::ExportError;

/// One raw row from the `cookies` table, value still encrypted
#[derive(Debug, Clone)]
pub struct RawCookieRow {
    pub host_key: String,
    pub name: String,
    pub encrypted_value: Vec<u8>,
    pub path: String,
    pub expires_utc: i64,
    pub is_secure: bool,
}

/// Read every cookie row from a snapshot.
pub fn read_rows(snapshot: &Path) -> Result<Vec<RawCookieRow>, ExportError> {
    let conn = Connection::open_with_flags(snapshot, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut stmt = conn.prepare(
        "SELECT host_key, name, encrypted_value, path, expires_utc, is_secure
         FROM cookies",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(RawCookieRow {
            host_key: row.get(0)?,
            name: row.get(1)?,
            encrypted_value: row.get::<_, Option<Vec<u8>>>(2)?.unwrap_or_default(),
            path: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            expires_utc: row.get::<_, Option<i64>>(4)?.unwrap_or(0),
            is_secure: row.get::<_, Option<i64>>(5)?.unwrap_or(0) != 0,
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_db(path: &Path) -> Connection {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE cookies (
                host_key TEXT NOT NULL,
                name TEXT NOT NULL,
                encrypted_value BLOB,
                path TEXT,
                expires_utc INTEGER,
                is_secure INTEGER
            )",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_read_rows_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("Cookies");
        {
            let conn = make_db(&db_path);
            conn.execute(
                "INSERT INTO cookies VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    ".site.com",
                    "sid",
                    &b"v10garbage"[..],
                    "/",
                    13100000000000000i64,
                    1
                ],
            )
            .unwrap();
        }

        let rows = read_rows(&db_path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].host_key, ".site.com");
        assert_eq!(rows[0].name, "sid");
        assert_eq!(rows[0].encrypted_value, b"v10garbage");
        assert_eq!(rows[0].path, "/");
        assert_eq!(rows[0].expires_utc, 13100000000000000);
        assert!(rows[0].is_secure);
    }

    #[test]
    fn test_null_columns_collapse_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("Cookies");
        {
            let conn = make_db(&db_path);
            conn.execute(
                "INSERT INTO cookies (host_key, name) VALUES ('example.com', 'bare')",
                [],
            )
            .unwrap();
        }

        let rows = read_rows(&db_path).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].encrypted_value.is_empty());
        assert!(rows[0].path.is_empty());
        assert_eq!(rows[0].expires_utc, 0);
        assert!(!rows[0].is_secure);
    }

    #[test]
    fn test_empty_table_yields_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("Cookies");
        make_db(&db_path);

        let rows = read_rows(&db_path).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_not_a_database_is_store_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("Cookies");
        std::fs::write(&db_path, b"this is not sqlite").unwrap();

        let result = read_rows(&db_path);
        assert!(matches!(result, Err(ExportError::StoreUnreadable(_))));
    }

    #[test]
    fn test_missing_table_is_store_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("Cookies");
        Connection::open(&db_path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (x)")
            .unwrap();

        let result = read_rows(&db_path);
        assert!(matches!(result, Err(ExportError::StoreUnreadable(_))));
    }
}
