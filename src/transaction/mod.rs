//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model, its draft/validation type and the id newtype
//! - The in-memory `TransactionLedger` the pages render from
//! - View handlers for the transaction list and the add/edit/delete flows

mod create_transaction_endpoint;
mod delete_transaction_endpoint;
mod edit_transaction_endpoint;
mod edit_transaction_page;
mod form;
mod ledger;
mod model;
mod new_transaction_page;
mod transactions_page;

pub use create_transaction_endpoint::create_transaction;
pub use delete_transaction_endpoint::delete_transaction;
pub use edit_transaction_endpoint::update_transaction;
pub use edit_transaction_page::get_edit_transaction_page;
pub use ledger::TransactionLedger;
pub use model::{Category, Transaction, TransactionDraft, TransactionId, TransactionType};
pub use new_transaction_page::get_new_transaction_page;
pub use transactions_page::{TransactionFilter, filter_transactions, get_transactions_page};

#[cfg(test)]
pub use form::TransactionForm;
