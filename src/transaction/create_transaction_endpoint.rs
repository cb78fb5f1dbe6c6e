//! Defines the endpoint for creating a new transaction.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{auth::AuthSession, dispatch::MutationDispatcher, endpoints};

use super::form::TransactionForm;

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
///
/// The record is added to the local cache before the remote write resolves;
/// a remote failure is logged and recorded but never undoes the local add.
pub async fn create_transaction(
    State(dispatcher): State<MutationDispatcher>,
    session: AuthSession,
    Form(form): Form<TransactionForm>,
) -> Response {
    let draft = match form.into_draft() {
        Ok(draft) => draft,
        Err(error) => return error.into_response(),
    };

    dispatcher.add(session.owner_email(), draft);

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
