use migration::MigrationCommand;
use sea_orm::{Database, DatabaseConnection};

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Connect to the database for the given profile and owner. Does not run
/// migrations.
pub async fn connect_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile, owner)?;
    let conn = Database::connect(&database_url).await?;
    Ok(conn)
}

/// Single startup entrypoint: connect with owner credentials, bring the
/// schema up to date, then hand back an app-level connection.
pub async fn bootstrap_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let migration_conn = connect_db(profile.clone(), DbOwner::Owner).await?;
    migration::migrate(&migration_conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;

    if owner == DbOwner::Owner {
        return Ok(migration_conn);
    }
    connect_db(profile, owner).await
}
