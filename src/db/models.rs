use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A login identity row. Owns exactly one [`Account`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub id: i64,
    pub firebase_id: String,
    pub email_address: String,
    pub account_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user profile row, owned by exactly one [`Credential`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub name: String,
}

/// Optional single image attached to an [`Account`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImage {
    pub id: i64,
    pub image_link: String,
    pub storage_uuid: String,
    pub account_id: i64,
}

/// Credential joined with its account, as returned by registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialWithAccount {
    #[serde(flatten)]
    pub credential: Credential,
    pub account: Account,
}

/// Account joined with its optional profile image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithImage {
    #[serde(flatten)]
    pub account: Account,
    pub image: Option<ProfileImage>,
}

/// The full profile returned by `GET /api/v1/user`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub credential: Credential,
    pub account: AccountWithImage,
}
