//! SQL DDL for initializing the account storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `accounts`: profile rows, `username` UNIQUE
/// - `credentials`: login identities, `firebase_id` and `email_address`
///   UNIQUE, exactly one row per account (`account_id` UNIQUE, cascade)
/// - `profile_images`: at most one row per account (`account_id` UNIQUE,
///   cascade)
/// - timestamps stored as RFC3339 text
///
/// The UNIQUE constraints are the backstop for concurrent registrations;
/// the application-level existence checks only provide friendlier errors.
/// Requires the connection-level `foreign_keys` pragma for cascades.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS credentials (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    firebase_id TEXT NOT NULL UNIQUE,
    email_address TEXT NOT NULL UNIQUE,
    account_id INTEGER NOT NULL UNIQUE REFERENCES accounts(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL  -- RFC3339
);

CREATE TABLE IF NOT EXISTS profile_images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    image_link TEXT NOT NULL,
    storage_uuid TEXT NOT NULL,
    account_id INTEGER NOT NULL UNIQUE REFERENCES accounts(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_credentials_firebase_id ON credentials(firebase_id)
"#;
