//! Request-scoped transaction helper.

use futures::future::BoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Execute `f` within a database transaction: begin, run, commit on Ok,
/// best-effort rollback on Err (preserving the original error).
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> BoxFuture<'t, Result<R, AppError>>,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
