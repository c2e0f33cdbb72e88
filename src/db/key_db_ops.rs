//! Key database operations
//!
//! Reads build a [`KeyGraph`] from the stored rows. Writes validate against
//! the graph loaded inside their own transaction, so the check and the
//! write see the same data.

use rusqlite::{params, Connection, TransactionBehavior};
use tracing::info;

use crate::core::{Key, KeyGrant, KeyGraph, KeyId, Removal, Result};

fn read_keys(conn: &Connection) -> Result<Vec<Key>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, name, key_type, parent_key_id, start_key_id, end_key_id
        FROM pseudonymisation_keys
        ORDER BY id
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,         // id
            row.get::<_, String>(1)?,      // name
            row.get::<_, String>(2)?,      // key_type
            row.get::<_, Option<i64>>(3)?, // parent_key_id
            row.get::<_, Option<i64>>(4)?, // start_key_id
            row.get::<_, Option<i64>>(5)?, // end_key_id
        ))
    })?;

    let mut keys = Vec::new();
    for row in rows {
        let (id, name, key_type, parent, start, end) = row?;
        keys.push(Key {
            id: KeyId(id),
            name,
            kind: key_type.parse()?,
            parent: parent.map(KeyId),
            start: start.map(KeyId),
            end: end.map(KeyId),
        });
    }
    Ok(keys)
}

fn read_grants(conn: &Connection) -> Result<Vec<KeyGrant>> {
    let mut stmt = conn.prepare("SELECT key_id, user FROM key_grants ORDER BY key_id, user")?;
    let grants = stmt
        .query_map([], |row| {
            Ok(KeyGrant {
                key: KeyId(row.get(0)?),
                user: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(grants)
}

/// Load every key and grant. Rows are taken as stored; call
/// [`KeyGraph::check`] to re-validate them.
pub fn load_graph(conn: &Connection) -> Result<KeyGraph> {
    Ok(KeyGraph::from_parts(read_keys(conn)?, read_grants(conn)?))
}

/// Id one above the highest stored id
pub fn next_key_id(conn: &Connection) -> Result<KeyId> {
    let id: i64 = conn.query_row(
        "SELECT COALESCE(MAX(id), 0) + 1 FROM pseudonymisation_keys",
        [],
        |row| row.get(0),
    )?;
    Ok(KeyId(id))
}

/// Validate and store a new key
pub fn create_key(conn: &mut Connection, key: Key) -> Result<KeyId> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut graph = load_graph(&tx)?;
    let id = graph.insert(key.clone())?;

    tx.execute(
        r#"
        INSERT INTO pseudonymisation_keys
            (id, name, key_type, parent_key_id, start_key_id, end_key_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            key.id.0,
            &key.name,
            key.kind.as_str(),
            key.parent.map(|k| k.0),
            key.start.map(|k| k.0),
            key.end.map(|k| k.0),
        ],
    )?;
    tx.commit()?;
    Ok(id)
}

/// Validate and store a new version of an existing key, returning the old one
pub fn update_key(conn: &mut Connection, key: Key) -> Result<Key> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut graph = load_graph(&tx)?;
    let previous = graph.update(key.clone())?;

    tx.execute(
        r#"
        UPDATE pseudonymisation_keys
        SET name = ?2, key_type = ?3, parent_key_id = ?4, start_key_id = ?5,
            end_key_id = ?6, updated_at = datetime('now')
        WHERE id = ?1
        "#,
        params![
            key.id.0,
            &key.name,
            key.kind.as_str(),
            key.parent.map(|k| k.0),
            key.start.map(|k| k.0),
            key.end.map(|k| k.0),
        ],
    )?;
    tx.commit()?;
    Ok(previous)
}

/// Delete a key, its secondary keys and all of their grants in one transaction
pub fn delete_key(conn: &mut Connection, id: KeyId) -> Result<Removal> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut graph = load_graph(&tx)?;
    let removal = graph.remove(id)?;

    for key in &removal.keys {
        tx.execute("DELETE FROM key_grants WHERE key_id = ?1", [key.0])?;
        tx.execute("DELETE FROM pseudonymisation_keys WHERE id = ?1", [key.0])?;
    }
    tx.commit()?;

    info!(
        id = %id,
        keys = removal.keys.len(),
        grants = removal.grants.len(),
        "deleted key from database"
    );
    Ok(removal)
}

/// Record that `user` may use key `id`
pub fn grant_key(conn: &mut Connection, id: KeyId, user: &str) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut graph = load_graph(&tx)?;
    graph.grant(id, user)?;
    tx.execute(
        "INSERT OR IGNORE INTO key_grants (key_id, user) VALUES (?1, ?2)",
        params![id.0, user],
    )?;
    tx.commit()?;
    Ok(())
}
