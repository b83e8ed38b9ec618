use crate::model::{AppSettings, AttendanceRecord, StudentProfile};
use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub const DB_FILE: &str = "sembuddy.sqlite3";

pub const PROFILE_KEY: &str = "sembuddy_profile";
pub const SETTINGS_KEY: &str = "sembuddy_settings";
pub const ATTENDANCE_KEY: &str = "sembuddy_attendance";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store(
            key TEXT PRIMARY KEY,
            value_json TEXT NOT NULL,
            updated_at TEXT
        )",
        [],
    )?;

    Ok(conn)
}

pub fn kv_get_json(conn: &Connection, key: &str) -> anyhow::Result<Option<serde_json::Value>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value_json FROM kv_store WHERE key = ?",
            [key],
            |r| r.get(0),
        )
        .optional()?;
    match raw {
        Some(s) => Ok(Some(serde_json::from_str(&s)?)),
        None => Ok(None),
    }
}

pub fn kv_set_json(conn: &Connection, key: &str, value: &serde_json::Value) -> anyhow::Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO kv_store(key, value_json, updated_at)
         VALUES(?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET
           value_json = excluded.value_json,
           updated_at = excluded.updated_at",
        (key, serde_json::to_string(value)?, now),
    )?;
    Ok(())
}

pub fn kv_clear(conn: &Connection) -> anyhow::Result<()> {
    conn.execute("DELETE FROM kv_store", [])?;
    Ok(())
}

pub fn read_typed<T: DeserializeOwned>(conn: &Connection, key: &str) -> anyhow::Result<Option<T>> {
    match kv_get_json(conn, key)? {
        Some(v) => Ok(Some(serde_json::from_value(v)?)),
        None => Ok(None),
    }
}

pub fn write_typed<T: Serialize>(conn: &Connection, key: &str, value: &T) -> anyhow::Result<()> {
    kv_set_json(conn, key, &serde_json::to_value(value)?)
}

/// Read a store entry, logging and falling back to `fallback` when the entry is
/// missing, unreadable or no longer matches the model.
fn load_or<T: DeserializeOwned>(conn: &Connection, key: &str, fallback: T) -> T {
    match read_typed(conn, key) {
        Ok(Some(v)) => v,
        Ok(None) => fallback,
        Err(e) => {
            tracing::warn!(key, error = %e, "store read failed; using default");
            fallback
        }
    }
}

/// Write a store entry. Failures are logged and otherwise ignored; the caller's
/// in-memory copy stays authoritative.
fn store_or_log<T: Serialize>(conn: &Connection, key: &str, value: &T) {
    if let Err(e) = write_typed(conn, key, value) {
        tracing::warn!(key, error = %e, "store write failed");
    }
}

pub fn load_profile(conn: &Connection) -> Option<StudentProfile> {
    load_or(conn, PROFILE_KEY, None)
}

pub fn load_settings(conn: &Connection) -> AppSettings {
    load_or(conn, SETTINGS_KEY, AppSettings::default())
}

pub fn load_attendance(conn: &Connection) -> Vec<AttendanceRecord> {
    load_or(conn, ATTENDANCE_KEY, Vec::new())
}

pub fn save_profile(conn: &Connection, profile: &StudentProfile) {
    store_or_log(conn, PROFILE_KEY, profile);
}

pub fn save_settings(conn: &Connection, settings: &AppSettings) {
    store_or_log(conn, SETTINGS_KEY, settings);
}

pub fn save_attendance(conn: &Connection, records: &[AttendanceRecord]) {
    store_or_log(conn, ATTENDANCE_KEY, &records);
}

pub fn clear_all(conn: &Connection) {
    if let Err(e) = kv_clear(conn) {
        tracing::warn!(error = %e, "store clear failed");
    }
}
