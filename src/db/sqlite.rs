use crate::db::models::{
    Account, AccountWithImage, Credential, CredentialWithAccount, ProfileImage, UserProfile,
};
use crate::db::schema::SQLITE_INIT;
use crate::error::VeridianError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

const CREDENTIAL_COLUMNS: &str =
    "id, firebase_id, email_address, account_id, created_at, updated_at";

/// Persistence gateway over the `credentials`, `accounts` and
/// `profile_images` tables. Every wrapper enforces exactly one
/// precondition: a conflict error when a unique key is already taken on
/// create, a not-found error when the target row is absent otherwise.
#[derive(Clone)]
pub struct AccountsStorage {
    pool: SqlitePool,
}

impl AccountsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and run the
    /// bundled DDL. Cascading deletes need the foreign-keys pragma on every
    /// connection of the pool.
    pub async fn connect(database_url: &str) -> Result<Self, VeridianError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), VeridianError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ---- credentials ----

    pub async fn find_credential_by_email(
        &self,
        email_address: &str,
    ) -> Result<Option<Credential>, VeridianError> {
        let row = sqlx::query(&format!(
            "SELECT {CREDENTIAL_COLUMNS} FROM credentials WHERE email_address = ?"
        ))
        .bind(email_address)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_credential).transpose()
    }

    pub async fn find_credential_by_firebase_id(
        &self,
        firebase_id: &str,
    ) -> Result<Option<Credential>, VeridianError> {
        let row = sqlx::query(&format!(
            "SELECT {CREDENTIAL_COLUMNS} FROM credentials WHERE firebase_id = ?"
        ))
        .bind(firebase_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_credential).transpose()
    }

    pub async fn get_credential(&self, id: i64) -> Result<Credential, VeridianError> {
        let row = sqlx::query(&format!(
            "SELECT {CREDENTIAL_COLUMNS} FROM credentials WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Self::row_to_credential(row),
            None => Err(VeridianError::NotFound("Credentials not found".to_string())),
        }
    }

    /// Update the email of an existing credential, bumping `updated_at`.
    pub async fn update_credential_email(
        &self,
        id: i64,
        email_address: &str,
    ) -> Result<Credential, VeridianError> {
        self.get_credential(id).await?;
        let updated_at = Utc::now();
        sqlx::query("UPDATE credentials SET email_address = ?, updated_at = ? WHERE id = ?")
            .bind(email_address)
            .bind(updated_at.to_rfc3339())
            .bind(id)
            .execute(&self.pool)
            .await?;
        self.get_credential(id).await
    }

    /// Create a credential with its nested account in one transaction.
    /// Conflict when a credential with the same email already exists.
    pub async fn create_registration(
        &self,
        firebase_id: &str,
        email_address: &str,
        username: &str,
        name: &str,
    ) -> Result<CredentialWithAccount, VeridianError> {
        if self.find_credential_by_email(email_address).await?.is_some() {
            return Err(VeridianError::Conflict(
                "Credentials already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let account_res = sqlx::query("INSERT INTO accounts (username, name) VALUES (?, ?)")
            .bind(username)
            .bind(name)
            .execute(&mut *tx)
            .await?;
        let account_id = account_res.last_insert_rowid();

        let credential_res = sqlx::query(
            r#"INSERT INTO credentials (firebase_id, email_address, account_id, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(firebase_id)
        .bind(email_address)
        .bind(account_id)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await?;
        let credential_id = credential_res.last_insert_rowid();

        tx.commit().await?;

        Ok(CredentialWithAccount {
            credential: Credential {
                id: credential_id,
                firebase_id: firebase_id.to_string(),
                email_address: email_address.to_string(),
                account_id,
                created_at: now,
                updated_at: now,
            },
            account: Account {
                id: account_id,
                username: username.to_string(),
                name: name.to_string(),
            },
        })
    }

    // ---- accounts ----

    pub async fn find_account_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, VeridianError> {
        let row = sqlx::query("SELECT id, username, name FROM accounts WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::row_to_account).transpose()
    }

    pub async fn get_account(&self, id: i64) -> Result<Account, VeridianError> {
        let row = sqlx::query("SELECT id, username, name FROM accounts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Self::row_to_account(row),
            None => Err(VeridianError::NotFound("Account not found".to_string())),
        }
    }

    /// Update an account's display name, and its username when one is
    /// given. Callers pass `None` to leave the username column untouched.
    pub async fn update_account(
        &self,
        id: i64,
        username: Option<&str>,
        name: &str,
    ) -> Result<Account, VeridianError> {
        self.get_account(id).await?;
        match username {
            Some(username) => {
                sqlx::query("UPDATE accounts SET username = ?, name = ? WHERE id = ?")
                    .bind(username)
                    .bind(name)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
            }
            None => {
                sqlx::query("UPDATE accounts SET name = ? WHERE id = ?")
                    .bind(name)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
            }
        }
        self.get_account(id).await
    }

    /// Delete an account, cascading to its credential and profile image.
    /// Returns the row as it was before deletion.
    pub async fn delete_account(&self, id: i64) -> Result<Account, VeridianError> {
        let account = self.get_account(id).await?;
        sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(account)
    }

    // ---- profile images ----

    pub async fn find_profile_image_by_account(
        &self,
        account_id: i64,
    ) -> Result<Option<ProfileImage>, VeridianError> {
        let row = sqlx::query(
            "SELECT id, image_link, storage_uuid, account_id FROM profile_images WHERE account_id = ?",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_profile_image).transpose()
    }

    pub async fn create_profile_image(
        &self,
        account_id: i64,
        image_link: &str,
        storage_uuid: &str,
    ) -> Result<ProfileImage, VeridianError> {
        if self
            .find_profile_image_by_account(account_id)
            .await?
            .is_some()
        {
            return Err(VeridianError::Conflict(
                "Profile Image already exists".to_string(),
            ));
        }
        let res = sqlx::query(
            "INSERT INTO profile_images (image_link, storage_uuid, account_id) VALUES (?, ?, ?)",
        )
        .bind(image_link)
        .bind(storage_uuid)
        .bind(account_id)
        .execute(&self.pool)
        .await?;
        Ok(ProfileImage {
            id: res.last_insert_rowid(),
            image_link: image_link.to_string(),
            storage_uuid: storage_uuid.to_string(),
            account_id,
        })
    }

    pub async fn update_profile_image(
        &self,
        account_id: i64,
        image_link: &str,
        storage_uuid: &str,
    ) -> Result<ProfileImage, VeridianError> {
        let Some(existing) = self.find_profile_image_by_account(account_id).await? else {
            return Err(VeridianError::NotFound(
                "Profile Image not found".to_string(),
            ));
        };
        sqlx::query("UPDATE profile_images SET image_link = ?, storage_uuid = ? WHERE id = ?")
            .bind(image_link)
            .bind(storage_uuid)
            .bind(existing.id)
            .execute(&self.pool)
            .await?;
        Ok(ProfileImage {
            id: existing.id,
            image_link: image_link.to_string(),
            storage_uuid: storage_uuid.to_string(),
            account_id,
        })
    }

    // ---- joins ----

    /// The full profile: credential, account and optional image.
    pub async fn get_profile(&self, credential_id: i64) -> Result<UserProfile, VeridianError> {
        let credential = self.get_credential(credential_id).await?;
        let account = self.get_account(credential.account_id).await?;
        let image = self.find_profile_image_by_account(account.id).await?;
        Ok(UserProfile {
            credential,
            account: AccountWithImage { account, image },
        })
    }

    fn row_to_credential(row: SqliteRow) -> Result<Credential, VeridianError> {
        let id: i64 = row.try_get("id")?;
        let firebase_id: String = row.try_get("firebase_id")?;
        let email_address: String = row.try_get("email_address")?;
        let account_id: i64 = row.try_get("account_id")?;
        let created_at = Self::parse_timestamp(row.try_get("created_at")?)?;
        let updated_at = Self::parse_timestamp(row.try_get("updated_at")?)?;

        Ok(Credential {
            id,
            firebase_id,
            email_address,
            account_id,
            created_at,
            updated_at,
        })
    }

    fn row_to_account(row: SqliteRow) -> Result<Account, VeridianError> {
        Ok(Account {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            name: row.try_get("name")?,
        })
    }

    fn row_to_profile_image(row: SqliteRow) -> Result<ProfileImage, VeridianError> {
        Ok(ProfileImage {
            id: row.try_get("id")?,
            image_link: row.try_get("image_link")?,
            storage_uuid: row.try_get("storage_uuid")?,
            account_id: row.try_get("account_id")?,
        })
    }

    fn parse_timestamp(raw: String) -> Result<DateTime<Utc>, VeridianError> {
        let parsed = DateTime::parse_from_rfc3339(&raw)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);
        Ok(parsed)
    }
}
