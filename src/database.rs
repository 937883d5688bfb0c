use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::registration::{PersistenceGateway, StorageError};
use crate::types::DbConn;

mod entities;
pub mod queries;

pub use entities::*;

/// Opens (creating if needed) the SQLite database and applies the migrations.
pub async fn open(location: &str) -> Result<DbConn> {
    log::debug!("Opening/creating and migrating database {:?}", location);

    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", location))
        .with_context(|| format!("Invalid database location {:?}", location))?
        .create_if_missing(true)
        .foreign_keys(true);

    let db = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .context("Failed to open database")?;

    migrate(&db).await?;

    log::debug!("Successfully opened database");

    Ok(db)
}

async fn migrate(db: &DbConn) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("Failed to migrate database")
}

#[cfg(test)]
pub async fn open_in_memory() -> Result<DbConn> {
    // every connection to sqlite::memory: is its own database, so keep one
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    migrate(&db).await?;
    Ok(db)
}

#[async_trait]
impl PersistenceGateway for DbConn {
    async fn insert_user(&self, user: &PersistedUser) -> Result<i64, StorageError> {
        Ok(queries::insert_user(self, user).await?)
    }

    async fn insert_team(&self, team: &NewTeam) -> Result<i64, StorageError> {
        Ok(queries::insert_team(self, team).await?)
    }
}
