// src/db/key_db_conn.rs
use std::{fs, path::Path};

use rusqlite::Connection;

use crate::aliases::DbPassphrase;
use crate::consts::DB_KDF_ITERATIONS;
use crate::core::Result;
use crate::error::CoreError;

/// Open (creating if needed) the SQLCipher key database named by the config
pub fn open_key_db() -> Result<Connection> {
    let config = crate::config::load();
    let db_path = config.key_db_path();

    let passphrase = if config.features.use_dev_keys {
        DbPassphrase::new(config.keys.key_db_key.clone())
    } else {
        let key = std::env::var("PKV_KEY_DB_KEY")
            .map_err(|_| CoreError::MissingSecret("PKV_KEY_DB_KEY"))?;
        DbPassphrase::new(key)
    };

    open_encrypted(&db_path, &passphrase)
}

/// Open an encrypted key database at `path` with an explicit passphrase,
/// creating missing parent directories
pub fn open_encrypted(path: impl AsRef<Path>, passphrase: &DbPassphrase) -> Result<Connection> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;

    conn.pragma_update(None, "key", passphrase.as_str())?;
    conn.execute_batch(&format!(
        r#"
        PRAGMA cipher_page_size = 4096;
        PRAGMA kdf_iter = {DB_KDF_ITERATIONS};
        PRAGMA cipher_hmac_algorithm = HMAC_SHA512;
        PRAGMA cipher_kdf_algorithm = PBKDF2_HMAC_SHA512;
        PRAGMA cipher_plaintext_header_size = 0;
        "#
    ))?;

    init_schema(&conn)?;
    Ok(conn)
}

/// Create the key tables. Relations are plain id columns: cascades are done
/// explicitly by `delete_key`, never by the database.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS pseudonymisation_keys (
            id            INTEGER PRIMARY KEY,
            name          TEXT NOT NULL UNIQUE,
            key_type      TEXT NOT NULL CHECK (key_type IN ('singular', 'compound')),
            parent_key_id INTEGER,
            start_key_id  INTEGER,
            end_key_id    INTEGER,
            created_at    TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at    TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_keys_parent ON pseudonymisation_keys(parent_key_id);
        CREATE INDEX IF NOT EXISTS idx_keys_start_end ON pseudonymisation_keys(start_key_id, end_key_id);

        CREATE TABLE IF NOT EXISTS key_grants (
            key_id     INTEGER NOT NULL,
            user       TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (key_id, user)
        );
        "#,
    )
}
