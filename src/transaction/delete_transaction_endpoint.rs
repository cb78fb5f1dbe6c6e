//! Defines the endpoint for deleting a transaction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{auth::AuthSession, dispatch::MutationDispatcher};

use super::model::TransactionId;

/// A route handler for deleting a transaction.
///
/// The confirmation prompt happens on the client; by the time this handler
/// runs the deletion is decided. A miss is treated the same as a hit so
/// the row disappears either way.
pub async fn delete_transaction(
    State(dispatcher): State<MutationDispatcher>,
    session: AuthSession,
    Path(id): Path<TransactionId>,
) -> Response {
    dispatcher.delete(session.owner_email(), id);

    // The status code has to be 200 OK or HTMX will not delete the table row.
    (StatusCode::OK, Html("")).into_response()
}
