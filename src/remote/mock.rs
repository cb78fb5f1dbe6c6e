//! Test doubles for the remote store.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::transaction::{Transaction, TransactionDraft, TransactionId};

use super::{RemoteError, RemoteStore};

/// A remote store that records every call and answers reads from a canned
/// list.
#[derive(Debug, Default)]
pub struct RecordingRemoteStore {
    pub reads: Mutex<Vec<String>>,
    pub creates: Mutex<Vec<(String, TransactionDraft)>>,
    pub deletes: Mutex<Vec<TransactionId>>,
    pub updates: Mutex<Vec<(TransactionId, TransactionDraft)>>,
    transactions: Mutex<Vec<Transaction>>,
}

impl RecordingRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
            ..Self::default()
        }
    }

    pub fn total_calls(&self) -> usize {
        lock(&self.reads).len()
            + lock(&self.creates).len()
            + lock(&self.deletes).len()
            + lock(&self.updates).len()
    }
}

#[async_trait]
impl RemoteStore for RecordingRemoteStore {
    async fn get_transactions(&self, owner: &str) -> Result<Vec<Transaction>, RemoteError> {
        lock(&self.reads).push(owner.to_owned());
        Ok(lock(&self.transactions).clone())
    }

    async fn add_transaction(
        &self,
        owner: &str,
        draft: &TransactionDraft,
    ) -> Result<(), RemoteError> {
        lock(&self.creates).push((owner.to_owned(), draft.clone()));
        Ok(())
    }

    async fn delete_transaction(&self, id: &TransactionId) -> Result<(), RemoteError> {
        lock(&self.deletes).push(id.clone());
        Ok(())
    }

    async fn update_transaction(
        &self,
        id: &TransactionId,
        draft: &TransactionDraft,
    ) -> Result<(), RemoteError> {
        lock(&self.updates).push((id.clone(), draft.clone()));
        Ok(())
    }
}

/// A remote store where every call fails with a transport error.
#[derive(Debug, Default)]
pub struct FailingRemoteStore;

impl FailingRemoteStore {
    fn error(&self) -> RemoteError {
        RemoteError::Transport("connection refused".to_owned())
    }
}

#[async_trait]
impl RemoteStore for FailingRemoteStore {
    async fn get_transactions(&self, _owner: &str) -> Result<Vec<Transaction>, RemoteError> {
        Err(self.error())
    }

    async fn add_transaction(
        &self,
        _owner: &str,
        _draft: &TransactionDraft,
    ) -> Result<(), RemoteError> {
        Err(self.error())
    }

    async fn delete_transaction(&self, _id: &TransactionId) -> Result<(), RemoteError> {
        Err(self.error())
    }

    async fn update_transaction(
        &self,
        _id: &TransactionId,
        _draft: &TransactionDraft,
    ) -> Result<(), RemoteError> {
        Err(self.error())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
