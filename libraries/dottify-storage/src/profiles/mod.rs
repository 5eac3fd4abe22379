use crate::StorageError;
use dottify_core::{error::Result, types::*};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Profile {
    Profile {
        id: row.get("id"),
        account_id: row.get("account_id"),
        display_name: row.get("display_name"),
    }
}

/// Create the profile for an account (at most one per account)
pub async fn create(pool: &SqlitePool, profile: CreateProfile) -> Result<Profile> {
    let result = sqlx::query("INSERT INTO profiles (account_id, display_name) VALUES (?, ?)")
        .bind(profile.account_id)
        .bind(&profile.display_name)
        .execute(pool)
        .await
        .map_err(|e| StorageError::from_write(e, "This account already has a profile."))?;

    Ok(Profile {
        id: result.last_insert_rowid(),
        account_id: profile.account_id,
        display_name: profile.display_name,
    })
}

/// Get profile by ID
pub async fn get_by_id(pool: &SqlitePool, id: ProfileId) -> Result<Option<Profile>> {
    let row = sqlx::query("SELECT id, account_id, display_name FROM profiles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Get the profile belonging to an account
pub async fn get_by_account(pool: &SqlitePool, account_id: AccountId) -> Result<Option<Profile>> {
    let row = sqlx::query("SELECT id, account_id, display_name FROM profiles WHERE account_id = ?")
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}
