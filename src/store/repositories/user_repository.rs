use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::user::{Role, UserRecord};
use crate::store::DataDir;

const USERS_TABLE: &str = "users";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl UserRow {
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            password: record.password.clone(),
            role: record.role.as_str().to_string(),
        }
    }

    pub fn into_record(self) -> AppResult<UserRecord> {
        Ok(UserRecord {
            username: self.username,
            password: self.password,
            role: Role::parse(&self.role)?,
        })
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn find(data: &DataDir, username: &str) -> AppResult<Option<UserRecord>> {
        let rows: Vec<UserRow> = data.read_rows(USERS_TABLE)?;
        rows.into_iter()
            .find(|row| row.username == username)
            .map(UserRow::into_record)
            .transpose()
    }

    /// Replaces the user table wholesale (seeding / admin import).
    pub fn save_all(data: &DataDir, records: &[UserRecord]) -> AppResult<()> {
        let rows: Vec<UserRow> = records.iter().map(UserRow::from_record).collect();
        data.update_rows::<UserRow, _>(USERS_TABLE, |_| rows)
    }
}
