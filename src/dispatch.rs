//! The mutation dispatcher: optimistic local writes with best-effort
//! remote persistence.
//!
//! Every mutation is two independent effects, deliberately kept apart:
//! the local ledger transition is applied synchronously before this module
//! returns, and the matching remote write — fired only for signed-in
//! owners — runs as a detached task. A failed remote write is logged and
//! recorded on the [RemoteFailureLog]; it is never retried and the local
//! change is never rolled back. Nothing orders concurrent remote writes:
//! only the ledger transitions are guaranteed to apply in submission
//! order.

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::task::JoinHandle;

use crate::{
    AppState,
    remote::{RemoteFailureLog, RemoteOp, RemoteStore},
    transaction::{Transaction, TransactionDraft, TransactionId, TransactionLedger},
};

/// Applies transaction mutations locally and mirrors them to the remote
/// store when a signed-in owner is present.
#[derive(Clone)]
pub struct MutationDispatcher {
    ledger: TransactionLedger,
    remote: Option<Arc<dyn RemoteStore>>,
    failures: RemoteFailureLog,
}

impl FromRef<AppState> for MutationDispatcher {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            remote: state.remote.clone(),
            failures: state.failures.clone(),
        }
    }
}

impl MutationDispatcher {
    pub fn new(
        ledger: TransactionLedger,
        remote: Option<Arc<dyn RemoteStore>>,
        failures: RemoteFailureLog,
    ) -> Self {
        Self {
            ledger,
            remote,
            failures,
        }
    }

    /// Create a record from `draft` with a freshly minted local id.
    ///
    /// The remote create sends the field values only; the store assigns its
    /// own id, which is first seen on the next full resync. Returns the
    /// record as stored locally and the handle of the remote write, if one
    /// was fired.
    pub fn add(
        &self,
        owner: Option<&str>,
        draft: TransactionDraft,
    ) -> (Transaction, Option<JoinHandle<()>>) {
        let transaction = Transaction::from_draft(draft.clone(), owner.map(str::to_owned));
        self.ledger.add(transaction.clone());
        tracing::info!("added transaction {} ({})", transaction.id, transaction.name);

        let handle = owner.map(str::to_owned).and_then(|owner| {
            self.spawn_remote_write(RemoteOp::Create, None, move |remote| async move {
                remote.add_transaction(&owner, &draft).await
            })
        });

        (transaction, handle)
    }

    /// Remove the record with the given id.
    ///
    /// The caller is responsible for having confirmed the deletion with the
    /// user. A local miss is a no-op; the remote delete is still fired for
    /// signed-in owners, keyed by whatever id the row carried.
    pub fn delete(&self, owner: Option<&str>, id: TransactionId) -> Option<JoinHandle<()>> {
        let removed = self.ledger.delete(&id);
        if removed {
            tracing::info!("deleted transaction {id}");
        } else {
            tracing::debug!("delete of unknown transaction {id} ignored");
        }

        if owner.is_none() {
            return None;
        }

        let remote_id = id.clone();
        self.spawn_remote_write(RemoteOp::Delete, Some(id), move |remote| async move {
            remote.delete_transaction(&remote_id).await
        })
    }

    /// Replace the user-editable fields of the record with the given id.
    ///
    /// Returns the merged record, or `None` (and no remote write) when the
    /// id is not in the ledger.
    pub fn update(
        &self,
        owner: Option<&str>,
        id: &TransactionId,
        draft: TransactionDraft,
    ) -> (Option<Transaction>, Option<JoinHandle<()>>) {
        let Some(existing) = self.ledger.get(id) else {
            tracing::debug!("edit of unknown transaction {id} ignored");
            return (None, None);
        };

        let merged = existing.merged_with(draft.clone());
        self.ledger.edit(merged.clone());
        tracing::info!("updated transaction {id}");

        if owner.is_none() {
            return (Some(merged), None);
        }

        let remote_id = id.clone();
        let handle = self.spawn_remote_write(
            RemoteOp::Update,
            Some(id.clone()),
            move |remote| async move { remote.update_transaction(&remote_id, &draft).await },
        );

        (Some(merged), handle)
    }

    fn spawn_remote_write<F, Fut>(
        &self,
        op: RemoteOp,
        id: Option<TransactionId>,
        write: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Arc<dyn RemoteStore>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), crate::remote::RemoteError>> + Send,
    {
        let remote = self.remote.clone()?;
        let failures = self.failures.clone();

        Some(tokio::spawn(async move {
            if let Err(error) = write(remote).await {
                tracing::error!("remote {op:?} failed: {error}");
                failures.record(op, id, error);
            }
        }))
    }
}
