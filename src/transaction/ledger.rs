//! The local transaction cache and its four state transitions.

use std::sync::{Arc, Mutex, PoisonError};

use super::model::{Transaction, TransactionId};

/// The in-memory, ordered collection of transaction records.
///
/// This is the cache the pages render from; the remote store is only
/// consulted by the sync adapter and the mutation dispatcher. Cloning is
/// cheap and shares the underlying list. Transitions are applied atomically
/// with respect to readers: there is a single writer at a time, and
/// [TransactionLedger::snapshot] observes either all of a transition or
/// none of it.
///
/// No transition validates field contents; validation happens at
/// form-submission time before records reach the ledger.
#[derive(Debug, Clone, Default)]
pub struct TransactionLedger {
    transactions: Arc<Mutex<Vec<Transaction>>>,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire sequence with `transactions`.
    ///
    /// Used on (re)hydration from the remote store. The previous contents
    /// are discarded without any merge.
    pub fn set_all(&self, transactions: Vec<Transaction>) {
        *self.lock() = transactions;
    }

    /// Append a record to the end of the sequence.
    pub fn add(&self, transaction: Transaction) {
        self.lock().push(transaction);
    }

    /// Remove the first record whose id equals `id`.
    ///
    /// A miss is a silent no-op, not an error. Returns whether a record was
    /// removed so callers can log the miss.
    pub fn delete(&self, id: &TransactionId) -> bool {
        let mut transactions = self.lock();

        match transactions.iter().position(|t| &t.id == id) {
            Some(index) => {
                transactions.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace the record whose id equals `transaction.id`.
    ///
    /// A miss is a silent no-op, not an error. Returns whether a record was
    /// replaced.
    pub fn edit(&self, transaction: Transaction) -> bool {
        let mut transactions = self.lock();

        match transactions.iter().position(|t| t.id == transaction.id) {
            Some(index) => {
                transactions[index] = transaction;
                true
            }
            None => false,
        }
    }

    /// Look up a record by id.
    pub fn get(&self, id: &TransactionId) -> Option<Transaction> {
        self.lock().iter().find(|t| &t.id == id).cloned()
    }

    /// A point-in-time copy of the full sequence, in insertion order.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Transaction>> {
        // Transitions cannot panic mid-write, so a poisoned lock still
        // holds a consistent list.
        self.transactions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{Category, Transaction, TransactionId, TransactionType};

    use super::TransactionLedger;

    fn transaction(id: &str, name: &str) -> Transaction {
        Transaction {
            id: TransactionId::from_remote(id),
            user_id: None,
            name: name.to_owned(),
            amount: 1.0,
            date: date!(2024 - 01 - 05),
            category: Category::Other,
            transaction_type: TransactionType::Expense,
            notes: String::new(),
        }
    }

    #[test]
    fn add_appends_in_submission_order() {
        let ledger = TransactionLedger::new();

        ledger.add(transaction("a", "first"));
        ledger.add(transaction("b", "second"));
        ledger.add(transaction("c", "third"));

        let names: Vec<_> = ledger.snapshot().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn set_all_discards_previous_contents() {
        let ledger = TransactionLedger::new();
        ledger.add(transaction("a", "stale"));

        ledger.set_all(vec![transaction("b", "fresh")]);

        let names: Vec<_> = ledger.snapshot().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["fresh"]);
    }

    #[test]
    fn delete_removes_only_the_matching_record() {
        let ledger = TransactionLedger::new();
        ledger.add(transaction("a", "keep"));
        ledger.add(transaction("b", "remove"));

        assert!(ledger.delete(&TransactionId::from_remote("b")));

        let names: Vec<_> = ledger.snapshot().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["keep"]);
    }

    #[test]
    fn delete_is_idempotent() {
        let ledger = TransactionLedger::new();
        ledger.add(transaction("a", "once"));
        let id = TransactionId::from_remote("a");

        assert!(ledger.delete(&id));
        assert!(!ledger.delete(&id));

        assert!(ledger.is_empty());
    }

    #[test]
    fn edit_replaces_the_matching_record() {
        let ledger = TransactionLedger::new();
        ledger.add(transaction("a", "before"));

        let replaced = ledger.edit(transaction("a", "after"));

        assert!(replaced);
        let names: Vec<_> = ledger.snapshot().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["after"]);
    }

    #[test]
    fn edit_with_unknown_id_leaves_ledger_unchanged() {
        let ledger = TransactionLedger::new();
        ledger.add(transaction("a", "original"));
        let before = ledger.snapshot();

        let replaced = ledger.edit(transaction("missing", "ignored"));

        assert!(!replaced);
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn get_finds_records_by_id() {
        let ledger = TransactionLedger::new();
        ledger.add(transaction("a", "found"));

        let got = ledger.get(&TransactionId::from_remote("a"));

        assert_eq!(got.map(|t| t.name), Some("found".to_owned()));
        assert_eq!(ledger.get(&TransactionId::from_remote("nope")), None);
    }
}
