//! The sync adapter: rehydrates the local cache from the remote store.

use std::sync::Arc;

use crate::transaction::TransactionLedger;

use super::{RemoteFailureLog, RemoteOp, RemoteStore};

/// Fetch the owner's full transaction list and replace the ledger with it.
///
/// Called at the top of every page handler, which is what re-triggers the
/// sync on each lifecycle change (log in, navigation, reload). The replace
/// is unconditional: whichever read completes last wins, with no merge
/// against local state.
///
/// Skipped entirely when there is no signed-in owner or no remote store is
/// configured; the ledger keeps whatever local-only state it had. A failed
/// read likewise leaves the previous cache untouched and is recorded on the
/// failure log.
pub async fn sync_from_remote(
    owner: Option<&str>,
    remote: Option<&Arc<dyn RemoteStore>>,
    ledger: &TransactionLedger,
    failures: &RemoteFailureLog,
) {
    let (Some(owner), Some(remote)) = (owner, remote) else {
        tracing::debug!("skipping remote sync: no signed-in owner or no remote store");
        return;
    };

    match remote.get_transactions(owner).await {
        Ok(transactions) => {
            tracing::debug!(
                "hydrated {} transactions for {owner} from the remote store",
                transactions.len()
            );
            ledger.set_all(transactions);
        }
        Err(error) => {
            tracing::error!("could not read transactions for {owner}: {error}");
            failures.record(RemoteOp::Read, None, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::macros::date;

    use crate::{
        remote::{
            RemoteFailureLog, RemoteOp, RemoteStore,
            mock::{FailingRemoteStore, RecordingRemoteStore},
        },
        transaction::{Category, Transaction, TransactionId, TransactionLedger, TransactionType},
    };

    use super::sync_from_remote;

    fn remote_transaction(id: &str) -> Transaction {
        Transaction {
            id: TransactionId::from_remote(id),
            user_id: Some("user@example.com".to_owned()),
            name: "Groceries run".to_owned(),
            amount: 62.4,
            date: date!(2024 - 04 - 02),
            category: Category::Groceries,
            transaction_type: TransactionType::Expense,
            notes: String::new(),
        }
    }

    fn local_transaction(name: &str) -> Transaction {
        Transaction {
            id: TransactionId::new_local(),
            user_id: None,
            name: name.to_owned(),
            amount: 10.0,
            date: date!(2024 - 04 - 01),
            category: Category::Other,
            transaction_type: TransactionType::Expense,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn sync_replaces_cache_wholesale() {
        let ledger = TransactionLedger::new();
        ledger.add(local_transaction("stale"));
        let remote: Arc<dyn RemoteStore> = Arc::new(RecordingRemoteStore::with_transactions(vec![
            remote_transaction("doc1"),
            remote_transaction("doc2"),
        ]));
        let failures = RemoteFailureLog::new();

        sync_from_remote(
            Some("user@example.com"),
            Some(&remote),
            &ledger,
            &failures,
        )
        .await;

        assert_eq!(ledger.len(), 2);
        assert!(ledger.get(&TransactionId::from_remote("doc1")).is_some());
        assert!(failures.is_empty());
    }

    #[tokio::test]
    async fn sync_is_skipped_without_an_owner() {
        let ledger = TransactionLedger::new();
        ledger.add(local_transaction("local-only"));
        let before = ledger.snapshot();
        let store = Arc::new(RecordingRemoteStore::new());
        let remote: Arc<dyn RemoteStore> = store.clone();
        let failures = RemoteFailureLog::new();

        sync_from_remote(None, Some(&remote), &ledger, &failures).await;

        assert_eq!(ledger.snapshot(), before);
        assert_eq!(store.total_calls(), 0);
    }

    #[tokio::test]
    async fn failed_read_leaves_previous_cache_untouched() {
        let ledger = TransactionLedger::new();
        ledger.add(local_transaction("first"));
        ledger.add(local_transaction("second"));
        let before = ledger.snapshot();
        let remote: Arc<dyn RemoteStore> = Arc::new(FailingRemoteStore);
        let failures = RemoteFailureLog::new();

        sync_from_remote(
            Some("user@example.com"),
            Some(&remote),
            &ledger,
            &failures,
        )
        .await;

        assert_eq!(ledger.snapshot(), before);
        let recorded = failures.snapshot();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].op, RemoteOp::Read);
    }
}
