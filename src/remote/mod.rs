//! The contract with the hosted document store.
//!
//! The remote store owns persistence; this crate only consumes its four
//! owner-keyed operations. The trait seam exists so the HTTP-backed
//! implementation can be swapped for a mock in tests.

mod convex;
#[cfg(test)]
pub mod mock;
mod sync;

pub use convex::ConvexRemoteStore;
pub use sync::sync_from_remote;

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::transaction::{Transaction, TransactionDraft, TransactionId};

/// The errors a remote operation can fail with.
///
/// These are never surfaced to the end user; they are logged and recorded
/// on the [RemoteFailureLog]. Local state is the source of truth and is
/// never rolled back on a remote failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced a usable response (connection refused,
    /// timeout, non-success HTTP status).
    #[error("remote store unreachable: {0}")]
    Transport(String),

    /// The store answered but rejected the call.
    #[error("remote store rejected the call: {0}")]
    Rejected(String),

    /// The response arrived but could not be decoded into transactions.
    #[error("could not decode remote response: {0}")]
    Decode(String),
}

/// The query/mutation bindings the hosted store exposes.
///
/// All writes are full-field; there is no partial patch. Reads are keyed by
/// the owner identity and return the complete list with no pagination.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Read all records belonging to `owner`.
    async fn get_transactions(&self, owner: &str) -> Result<Vec<Transaction>, RemoteError>;

    /// Create a record from the draft's field values.
    ///
    /// The store assigns its own identifier; the caller's local id is never
    /// sent.
    async fn add_transaction(
        &self,
        owner: &str,
        draft: &TransactionDraft,
    ) -> Result<(), RemoteError>;

    /// Delete the record with the given store identifier.
    async fn delete_transaction(&self, id: &TransactionId) -> Result<(), RemoteError>;

    /// Overwrite all fields of the record with the given store identifier.
    async fn update_transaction(
        &self,
        id: &TransactionId,
        draft: &TransactionDraft,
    ) -> Result<(), RemoteError>;
}

/// The remote operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOp {
    Read,
    Create,
    Delete,
    Update,
}

/// A remote call that failed and was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFailure {
    pub op: RemoteOp,
    /// The record the call was keyed by, where one exists.
    pub id: Option<TransactionId>,
    pub error: RemoteError,
    pub at: OffsetDateTime,
}

/// The failure channel for fire-and-forget remote calls.
///
/// Failed calls are not retried and never roll back the optimistic local
/// change; recording them here keeps the divergence observable instead of
/// vanishing into the logs alone.
#[derive(Debug, Clone, Default)]
pub struct RemoteFailureLog {
    failures: Arc<Mutex<Vec<RemoteFailure>>>,
}

impl RemoteFailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, op: RemoteOp, id: Option<TransactionId>, error: RemoteError) {
        self.lock().push(RemoteFailure {
            op,
            id,
            error,
            at: OffsetDateTime::now_utc(),
        });
    }

    /// A copy of all failures recorded so far, oldest first.
    pub fn snapshot(&self) -> Vec<RemoteFailure> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RemoteFailure>> {
        self.failures.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
