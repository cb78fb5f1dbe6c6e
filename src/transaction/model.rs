//! Defines the core data types for transactions.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::Error;

/// The opaque identifier of a transaction.
///
/// Records created locally carry a freshly generated UUID from
/// [TransactionId::new_local]; records hydrated from the remote store carry
/// the document id the store assigned. Exactly one of the two is ever
/// authoritative for a record: the local id survives only until the next
/// full resync replaces the cache with remote-assigned ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Mint a new id for a locally created record.
    pub fn new_local() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an id assigned by the remote store.
    pub fn from_remote(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of transaction categories.
///
/// Matches the enumeration the remote store validates against, so the
/// variants must round-trip through their display names unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Transportation,
    Entertainment,
    Housing,
    Utilities,
    Healthcare,
    Education,
    Shopping,
    Salary,
    Investment,
    Other,
}

impl Category {
    /// All categories in display order, for form dropdowns and summaries.
    pub const ALL: [Category; 11] = [
        Category::Groceries,
        Category::Transportation,
        Category::Entertainment,
        Category::Housing,
        Category::Utilities,
        Category::Healthcare,
        Category::Education,
        Category::Shopping,
        Category::Salary,
        Category::Investment,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Housing => "Housing",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Shopping => "Shopping",
            Category::Salary => "Salary",
            Category::Investment => "Investment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a transaction brings money in or takes money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The sign shown in front of formatted amounts.
    pub fn sign(self) -> &'static str {
        match self {
            TransactionType::Income => "+",
            TransactionType::Expense => "-",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An income or expense record, the sole entity of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The record's identifier, either locally minted or remote-assigned.
    pub id: TransactionId,
    /// The owner's identity (email). `None` for local-only records created
    /// while signed out.
    pub user_id: Option<String>,
    /// Display label, non-empty.
    pub name: String,
    /// Non-negative amount; the direction is carried by `transaction_type`.
    pub amount: f64,
    /// The calendar date the transaction happened.
    pub date: Date,
    pub category: Category,
    pub transaction_type: TransactionType,
    /// Optional free text, empty when absent.
    pub notes: String,
}

impl Transaction {
    /// Build a record from validated form input, minting a local id.
    pub fn from_draft(draft: TransactionDraft, user_id: Option<String>) -> Self {
        Self {
            id: TransactionId::new_local(),
            user_id,
            name: draft.name,
            amount: draft.amount,
            date: draft.date,
            category: draft.category,
            transaction_type: draft.transaction_type,
            notes: draft.notes,
        }
    }

    /// Replace the user-editable fields with `draft`, keeping id and owner.
    pub fn merged_with(&self, draft: TransactionDraft) -> Self {
        Self {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            name: draft.name,
            amount: draft.amount,
            date: draft.date,
            category: draft.category,
            transaction_type: draft.transaction_type,
            notes: draft.notes,
        }
    }
}

/// Validated transaction form input.
///
/// The ledger itself accepts whatever records it is handed; validation is
/// enforced here, at form-submission time, and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub name: String,
    pub amount: f64,
    pub date: Date,
    pub category: Category,
    pub transaction_type: TransactionType,
    pub notes: String,
}

impl TransactionDraft {
    /// Validate raw form fields.
    ///
    /// # Errors
    /// Returns [Error::EmptyName] if `name` is blank and
    /// [Error::InvalidAmount] if `amount` is negative or not a number.
    pub fn new(
        name: String,
        amount: f64,
        date: Date,
        category: Category,
        transaction_type: TransactionType,
        notes: String,
    ) -> Result<Self, Error> {
        if name.trim().is_empty() {
            return Err(Error::EmptyName);
        }

        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        Ok(Self {
            name,
            amount,
            date,
            category,
            transaction_type,
            notes,
        })
    }
}
