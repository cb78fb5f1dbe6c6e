//! HTTP client for the hosted store's query/mutation functions.
//!
//! The deployment exposes its generated bindings over two endpoints:
//! `POST /api/query` and `POST /api/mutation`, both taking
//! `{"path": "transactions:<fn>", "args": {...}, "format": "json"}` and
//! answering with a `{"status": ..., "value": ...}` envelope.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::transaction::{Category, Transaction, TransactionDraft, TransactionId, TransactionType};

use super::{RemoteError, RemoteStore};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A remote store reached over a Convex-style function API.
#[derive(Debug, Clone)]
pub struct ConvexRemoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl ConvexRemoteStore {
    /// Create a client for the deployment at `base_url`,
    /// e.g. `https://adjective-animal-123.convex.cloud`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    async fn call(&self, endpoint: &str, path: &str, args: Value) -> Result<Value, RemoteError> {
        let url = format!("{}/api/{endpoint}", self.base_url);
        let body = json!({
            "path": path,
            "args": args,
            "format": "json",
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|error| RemoteError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Transport(format!("{path} returned {status}")));
        }

        let envelope: FunctionResponse = response
            .json()
            .await
            .map_err(|error| RemoteError::Decode(error.to_string()))?;

        match envelope.status.as_str() {
            "success" => Ok(envelope.value.unwrap_or(Value::Null)),
            _ => Err(RemoteError::Rejected(
                envelope
                    .error_message
                    .unwrap_or_else(|| format!("{path} failed without a message")),
            )),
        }
    }
}

#[async_trait]
impl RemoteStore for ConvexRemoteStore {
    async fn get_transactions(&self, owner: &str) -> Result<Vec<Transaction>, RemoteError> {
        let value = self
            .call(
                "query",
                "transactions:getTransactions",
                json!({ "userId": owner }),
            )
            .await?;

        let documents: Vec<TransactionDocument> = serde_json::from_value(value)
            .map_err(|error| RemoteError::Decode(error.to_string()))?;

        documents
            .into_iter()
            .map(TransactionDocument::into_transaction)
            .collect()
    }

    async fn add_transaction(
        &self,
        owner: &str,
        draft: &TransactionDraft,
    ) -> Result<(), RemoteError> {
        self.call(
            "mutation",
            "transactions:addTransaction",
            json!({
                "userId": owner,
                "name": draft.name,
                "amount": draft.amount,
                "date": format_date(draft.date)?,
                "category": draft.category,
                "type": draft.transaction_type,
                "notes": draft.notes,
            }),
        )
        .await?;

        Ok(())
    }

    async fn delete_transaction(&self, id: &TransactionId) -> Result<(), RemoteError> {
        self.call(
            "mutation",
            "transactions:deleteTransaction",
            json!({ "id": id }),
        )
        .await?;

        Ok(())
    }

    async fn update_transaction(
        &self,
        id: &TransactionId,
        draft: &TransactionDraft,
    ) -> Result<(), RemoteError> {
        self.call(
            "mutation",
            "transactions:updateTransaction",
            json!({
                "id": id,
                "name": draft.name,
                "amount": draft.amount,
                "date": format_date(draft.date)?,
                "category": draft.category,
                "type": draft.transaction_type,
                "notes": draft.notes,
            }),
        )
        .await?;

        Ok(())
    }
}

fn format_date(date: Date) -> Result<String, RemoteError> {
    date.format(DATE_FORMAT)
        .map_err(|error| RemoteError::Decode(format!("could not format date {date}: {error}")))
}

/// The function response envelope.
#[derive(Debug, Deserialize)]
struct FunctionResponse {
    status: String,
    value: Option<Value>,
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
}

/// A transaction document as the store returns it.
#[derive(Debug, Deserialize)]
struct TransactionDocument {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "userId")]
    user_id: String,
    name: String,
    amount: f64,
    date: String,
    category: Category,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    #[serde(default)]
    notes: Option<String>,
}

impl TransactionDocument {
    fn into_transaction(self) -> Result<Transaction, RemoteError> {
        let date = Date::parse(&self.date, DATE_FORMAT).map_err(|error| {
            RemoteError::Decode(format!("invalid date \"{}\": {error}", self.date))
        })?;

        Ok(Transaction {
            id: TransactionId::from_remote(self.id),
            user_id: Some(self.user_id),
            name: self.name,
            amount: self.amount,
            date,
            category: self.category,
            transaction_type: self.transaction_type,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use crate::{
        remote::RemoteError,
        transaction::{Category, TransactionType},
    };

    use super::TransactionDocument;

    #[test]
    fn document_converts_to_transaction() {
        let document: TransactionDocument = serde_json::from_value(json!({
            "_id": "jd7c2fk9",
            "userId": "user@example.com",
            "name": "Coffee",
            "amount": 5.0,
            "date": "2024-03-01",
            "category": "Other",
            "type": "expense",
        }))
        .unwrap();

        let transaction = document.into_transaction().unwrap();

        assert_eq!(transaction.id.as_str(), "jd7c2fk9");
        assert_eq!(transaction.user_id.as_deref(), Some("user@example.com"));
        assert_eq!(transaction.date, date!(2024 - 03 - 01));
        assert_eq!(transaction.category, Category::Other);
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.notes, "");
    }

    #[test]
    fn document_with_invalid_date_fails_to_decode() {
        let document: TransactionDocument = serde_json::from_value(json!({
            "_id": "jd7c2fk9",
            "userId": "user@example.com",
            "name": "Coffee",
            "amount": 5.0,
            "date": "03/01/2024",
            "category": "Other",
            "type": "expense",
        }))
        .unwrap();

        assert!(matches!(
            document.into_transaction(),
            Err(RemoteError::Decode(_))
        ));
    }

    #[test]
    fn document_with_unknown_category_is_rejected_by_serde() {
        let result: Result<TransactionDocument, _> = serde_json::from_value(json!({
            "_id": "jd7c2fk9",
            "userId": "user@example.com",
            "name": "Coffee",
            "amount": 5.0,
            "date": "2024-03-01",
            "category": "Snacks",
            "type": "expense",
        }));

        assert!(result.is_err());
    }
}
