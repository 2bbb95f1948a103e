use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures_util::future::BoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A shared transaction wrapper that can be injected into request
/// extensions, letting tests observe and roll back a handler's writes.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }
}

/// Execute a function within a database transaction.
///
/// 1) If a SharedTxn is in request extensions, use it (no commit/rollback here).
/// 2) Otherwise begin a transaction, run the closure, apply the process
///    policy on Ok and roll back on Err.
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> BoxFuture<'a, Result<R, AppError>>,
{
    // Pull any SharedTxn out of extensions before awaiting so no RefCell
    // borrow is held across the await.
    let shared_txn: Option<SharedTxn> = if let Some(r) = req {
        r.extensions().get::<SharedTxn>().cloned()
    } else {
        None
    };

    if let Some(shared) = shared_txn {
        return f(shared.transaction()).await;
    }

    let txn = require_db(state)?.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // Best-effort rollback; preserve the original error.
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::ConnectionTrait;

    use super::with_txn;
    use crate::error::AppError;
    use crate::state::app_state::AppState;

    // Type check only: the closure must be able to hand back a future
    // that borrows the transaction, the way every route handler does.
    #[allow(dead_code)]
    async fn closure_may_borrow_the_transaction(state: &AppState) -> Result<u64, AppError> {
        with_txn(None, state, |txn| {
            Box::pin(async move {
                let _ = txn.get_database_backend();
                Ok(7)
            })
        })
        .await
    }
}
