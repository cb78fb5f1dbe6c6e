//! Defines the endpoint for updating an existing transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error, auth::AuthSession, dispatch::MutationDispatcher, endpoints,
};

use super::{form::TransactionForm, model::TransactionId};

/// A route handler for updating a transaction, redirects to the
/// transactions view on success.
///
/// All user-editable fields are replaced with the submitted values; the id
/// and owner are kept. The local cache is updated before the remote write
/// resolves.
pub async fn update_transaction(
    State(dispatcher): State<MutationDispatcher>,
    session: AuthSession,
    Path(id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(error) => return error.into_response(),
    };

    let (updated, _) = dispatcher.update(session.owner_email(), &id, draft);
    if updated.is_none() {
        return Error::NotFound.into_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use time::macros::date;

    use crate::{
        auth::AuthSession,
        dispatch::MutationDispatcher,
        endpoints,
        remote::RemoteFailureLog,
        transaction::{
            Category, Transaction, TransactionForm, TransactionId, TransactionLedger,
            TransactionType,
        },
    };

    use super::update_transaction;

    fn ledger_with_transaction() -> TransactionLedger {
        let ledger = TransactionLedger::new();
        ledger.add(Transaction {
            id: TransactionId::from_remote("doc1"),
            user_id: None,
            name: "Coffee".to_owned(),
            amount: 5.0,
            date: date!(2024 - 03 - 01),
            category: Category::Other,
            transaction_type: TransactionType::Expense,
            notes: String::new(),
        });
        ledger
    }

    fn form(name: &str) -> TransactionForm {
        TransactionForm {
            name: name.to_owned(),
            amount: 14.0,
            date: date!(2024 - 03 - 02),
            category: Category::Entertainment,
            transaction_type: TransactionType::Expense,
            notes: "with friends".to_owned(),
        }
    }

    #[tokio::test]
    async fn valid_form_replaces_fields_and_redirects() {
        let ledger = ledger_with_transaction();
        let dispatcher =
            MutationDispatcher::new(ledger.clone(), None, RemoteFailureLog::new());

        let response = update_transaction(
            State(dispatcher),
            AuthSession(None),
            Path(TransactionId::from_remote("doc1")),
            Form(form("Cinema")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            endpoints::TRANSACTIONS_VIEW
        );
        let updated = ledger
            .get(&TransactionId::from_remote("doc1"))
            .expect("the record should still exist");
        assert_eq!(updated.name, "Cinema");
        assert_eq!(updated.amount, 14.0);
        assert_eq!(updated.category, Category::Entertainment);
    }

    #[tokio::test]
    async fn unknown_id_returns_not_found() {
        let ledger = ledger_with_transaction();
        let dispatcher =
            MutationDispatcher::new(ledger.clone(), None, RemoteFailureLog::new());

        let response = update_transaction(
            State(dispatcher),
            AuthSession(None),
            Path(TransactionId::from_remote("missing")),
            Form(form("Cinema")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(ledger.snapshot()[0].name, "Coffee");
    }

    #[tokio::test]
    async fn invalid_form_leaves_the_record_unchanged() {
        let ledger = ledger_with_transaction();
        let dispatcher =
            MutationDispatcher::new(ledger.clone(), None, RemoteFailureLog::new());

        let response = update_transaction(
            State(dispatcher),
            AuthSession(None),
            Path(TransactionId::from_remote("doc1")),
            Form(form("   ")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ledger.snapshot()[0].name, "Coffee");
    }
}
