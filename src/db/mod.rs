//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and nested API shapes
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the guarded CRUD gateway

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Account, AccountWithImage, Credential, CredentialWithAccount, ProfileImage, UserProfile};
pub use schema::SQLITE_INIT;
pub use sqlite::{AccountsStorage, SqlitePool};
