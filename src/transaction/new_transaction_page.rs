//! Defines the page for creating a transaction.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::html;
use time::OffsetDateTime;

use crate::{
    AppState, Error, auth::AuthSession, endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::get_local_offset,
};

use super::form::{FormValues, transaction_form};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Africa/Algiers".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for creating a transaction.
///
/// The date input is capped at the current local date; transactions record
/// things that have already happened.
pub async fn get_new_transaction_page(
    State(state): State<NewTransactionPageState>,
    session: AuthSession,
) -> Response {
    let local_offset = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => return Error::InvalidTimezoneError(state.local_timezone).into_response(),
    };
    let today = OffsetDateTime::now_utc().to_offset(local_offset).date();

    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW)
        .with_identity(session.owner_email())
        .into_html();
    let form = transaction_form(
        ("hx-post", endpoints::POST_TRANSACTION),
        "Add Transaction",
        today,
        &FormValues::empty(today),
    );

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-md"
            {
                h1 class="text-2xl font-bold mb-4" { "Add Transaction" }
                (form)
            }
        }
    };

    base("Add Transaction", &[], &content).into_response()
}
