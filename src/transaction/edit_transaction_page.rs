//! Defines the page for editing an existing transaction.

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use time::OffsetDateTime;

use crate::{
    AppState, Error, auth::AuthSession, endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    not_found::NotFoundError,
    timezone::get_local_offset,
};

use super::{
    form::{FormValues, transaction_form},
    ledger::TransactionLedger,
    model::TransactionId,
};

/// The state needed for the edit transaction page.
#[derive(Debug, Clone)]
pub struct EditTransactionPageState {
    pub ledger: TransactionLedger,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Algiers".
    pub local_timezone: String,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for editing the transaction with the given id,
/// pre-filled with its current field values.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    session: AuthSession,
    Path(id): Path<TransactionId>,
) -> Response {
    let Some(transaction) = state.ledger.get(&id) else {
        return NotFoundError.into_response();
    };

    let local_offset = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => return Error::InvalidTimezoneError(state.local_timezone).into_response(),
    };
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW)
        .with_identity(session.owner_email())
        .into_html();
    let update_url = endpoints::format_endpoint(endpoints::PUT_TRANSACTION, id.as_str());
    let form = transaction_form(
        ("hx-put", &update_url),
        "Save Changes",
        today,
        &FormValues::from_transaction(&transaction),
    );

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md"
            {
                h1 class="text-2xl font-bold mb-4" { "Edit Transaction" }
                (form)
            }
        }
    };

    base("Edit Transaction", &[], &content).into_response()
}
