pub mod txn;
pub mod txn_policy;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Get the database connection or fail with a database-unavailable error.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db.as_ref().ok_or_else(AppError::db_unavailable)
}
