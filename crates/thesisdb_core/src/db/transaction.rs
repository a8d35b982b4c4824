//! Transaction runner shared by every write path.
//!
//! # Invariants
//! - `work` either commits as a whole or leaves no trace.
//! - Failures are returned to the caller, never retried.

use log::{debug, error, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::fmt::Display;
use std::time::Instant;

/// Runs `work` inside one immediate transaction.
///
/// Commits when `work` returns `Ok`. On `Err` the transaction is rolled back
/// and the error is handed back unchanged. A failed begin or commit is
/// converted through `E: From<rusqlite::Error>`.
///
/// `label` names the unit of work in log events.
pub fn transact<T, E, F>(conn: &mut Connection, label: &'static str, work: F) -> Result<T, E>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, E>,
    E: From<rusqlite::Error> + Display,
{
    let started_at = Instant::now();
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    match work(&tx) {
        Ok(value) => {
            if let Err(err) = tx.commit() {
                error!(
                    "event=tx_commit module=db status=error op={label} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
            debug!(
                "event=tx_commit module=db status=ok op={label} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(value)
        }
        Err(err) => {
            match tx.rollback() {
                Ok(()) => warn!(
                    "event=tx_rollback module=db status=ok op={label} duration_ms={} cause={err}",
                    started_at.elapsed().as_millis()
                ),
                // Dropping the handle already discarded the work; report the
                // original failure rather than the rollback one.
                Err(rollback_err) => error!(
                    "event=tx_rollback module=db status=error op={label} cause={err} error={rollback_err}"
                ),
            }
            Err(err)
        }
    }
}
