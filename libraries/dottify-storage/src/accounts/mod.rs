use crate::StorageError;
use chrono::{DateTime, Utc};
use dottify_core::{error::Result, types::*, Role};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn from_row(row: &SqliteRow) -> Account {
    Account {
        id: row.get("id"),
        username: row.get("username"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    }
}

/// Create a new account
pub async fn create(pool: &SqlitePool, account: CreateAccount) -> Result<Account> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO accounts (username, password_hash, created_at) VALUES (?, ?, ?)",
    )
    .bind(&account.username)
    .bind(&account.password_hash)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| StorageError::from_write(e, "A user with that username already exists."))?;

    Ok(Account {
        id: result.last_insert_rowid(),
        username: account.username,
        created_at: now,
    })
}

/// Create an account with its roles and profile in one transaction
///
/// Nothing is kept when any of the inserts fails, so an account never
/// exists without its profile.
pub async fn register(pool: &SqlitePool, registration: Registration) -> Result<(Account, Profile)> {
    let now = Utc::now();
    let mut tx = pool.begin().await.map_err(StorageError::from)?;

    let account_id = sqlx::query(
        "INSERT INTO accounts (username, password_hash, created_at) VALUES (?, ?, ?)",
    )
    .bind(&registration.username)
    .bind(&registration.password_hash)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| StorageError::from_write(e, "A user with that username already exists."))?
    .last_insert_rowid();

    for role in &registration.roles {
        sqlx::query("INSERT OR IGNORE INTO account_roles (account_id, role) VALUES (?, ?)")
            .bind(account_id)
            .bind(role.group_name())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;
    }

    let profile_id = sqlx::query("INSERT INTO profiles (account_id, display_name) VALUES (?, ?)")
        .bind(account_id)
        .bind(&registration.display_name)
        .execute(&mut *tx)
        .await
        .map_err(|e| StorageError::from_write(e, "This account already has a profile."))?
        .last_insert_rowid();

    tx.commit().await.map_err(StorageError::from)?;

    Ok((
        Account {
            id: account_id,
            username: registration.username,
            created_at: now,
        },
        Profile {
            id: profile_id,
            account_id,
            display_name: registration.display_name,
        },
    ))
}

/// Get account by ID
pub async fn get_by_id(pool: &SqlitePool, id: AccountId) -> Result<Option<Account>> {
    let row = sqlx::query("SELECT id, username, created_at FROM accounts WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Find account by username
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<Account>> {
    let row = sqlx::query("SELECT id, username, created_at FROM accounts WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Get all accounts
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Account>> {
    let rows = sqlx::query("SELECT id, username, created_at FROM accounts ORDER BY username")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Get password hash for an account (for authentication)
pub async fn get_password_hash(pool: &SqlitePool, account_id: AccountId) -> Result<Option<String>> {
    let row = sqlx::query("SELECT password_hash FROM accounts WHERE id = ?")
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("password_hash")))
}

/// Add an account to a role group; granting twice is a no-op
pub async fn grant_role(pool: &SqlitePool, account_id: AccountId, role: Role) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO account_roles (account_id, role) VALUES (?, ?)")
        .bind(account_id)
        .bind(role.group_name())
        .execute(pool)
        .await?;

    Ok(())
}

/// Roles held by an account
pub async fn get_roles(pool: &SqlitePool, account_id: AccountId) -> Result<Vec<Role>> {
    let rows = sqlx::query("SELECT role FROM account_roles WHERE account_id = ? ORDER BY role")
        .bind(account_id)
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| {
            let name: String = row.get("role");
            name.parse::<Role>()
                .map_err(|e| StorageError::corrupt(e).into())
        })
        .collect()
}
