//! The page that lists, filters and exports transactions.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::AuthSession,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        directed_amount_span,
    },
    navigation::NavBar,
    remote::{RemoteFailureLog, RemoteStore, sync_from_remote},
    timezone::get_local_offset,
};

use super::{
    ledger::TransactionLedger,
    model::{Category, Transaction},
};

/// The filter query for the transaction list and the export downloads.
///
/// An absent or `all` category matches every record. The date filter is an
/// exact string comparison against the transaction date, so only a full
/// `YYYY-MM-DD` value ever matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl TransactionFilter {
    fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty() && *category != "all")
    }

    fn date_filter(&self) -> Option<&str> {
        self.date.as_deref().filter(|date| !date.is_empty())
    }

    fn is_active(&self) -> bool {
        self.category_filter().is_some() || self.date_filter().is_some()
    }

    fn to_query_string(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("?{query}"),
            Ok(_) => String::new(),
            Err(error) => {
                tracing::error!("could not encode filter query: {error}");
                String::new()
            }
        }
    }
}

/// Keep the transactions that match every active filter, preserving order.
pub fn filter_transactions(
    transactions: Vec<Transaction>,
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    transactions
        .into_iter()
        .filter(|transaction| {
            filter
                .category_filter()
                .is_none_or(|category| transaction.category.as_str() == category)
        })
        .filter(|transaction| {
            filter
                .date_filter()
                .is_none_or(|date| transaction.date.to_string() == date)
        })
        .collect()
}

/// The state needed to show the transactions page.
#[derive(Clone)]
pub struct TransactionsViewState {
    pub ledger: TransactionLedger,
    pub remote: Option<Arc<dyn RemoteStore>>,
    pub failures: RemoteFailureLog,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Algiers".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            remote: state.remote.clone(),
            failures: state.failures.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render an overview of the user's transactions.
///
/// Signed-in sessions first refresh the local cache from the remote store;
/// a failed refresh keeps the current cache and the page still renders.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    session: AuthSession,
    Query(filter): Query<TransactionFilter>,
) -> Result<Response, Error> {
    sync_from_remote(
        session.owner_email(),
        state.remote.as_ref(),
        &state.ledger,
        &state.failures,
    )
    .await;

    if get_local_offset(&state.local_timezone).is_none() {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Err(Error::InvalidTimezoneError(state.local_timezone));
    }

    let transactions = filter_transactions(state.ledger.snapshot(), &filter);

    Ok(transactions_view(&transactions, &filter, &session).into_response())
}

fn transactions_view(
    transactions: &[Transaction],
    filter: &TransactionFilter,
    session: &AuthSession,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW)
        .with_identity(session.owner_email())
        .into_html();
    let query = filter.to_query_string();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl"
            {
                div class="flex flex-wrap items-center justify-between gap-2 mb-4"
                {
                    h1 class="text-2xl font-bold" { "Transactions" }

                    div class="flex gap-2"
                    {
                        a
                            href=(format!("{}{query}", endpoints::EXPORT_CSV))
                            class=(BUTTON_SECONDARY_STYLE)
                            download
                        {
                            "Export CSV"
                        }
                        a
                            href=(format!("{}{query}", endpoints::EXPORT_PDF))
                            class=(BUTTON_SECONDARY_STYLE)
                            download
                        {
                            "Export PDF"
                        }
                        a
                            href=(endpoints::NEW_TRANSACTION_VIEW)
                            class=(BUTTON_SECONDARY_STYLE)
                        {
                            "Add Transaction"
                        }
                    }
                }

                (filter_form(filter))

                @if transactions.is_empty()
                {
                    p id="empty-state" class="text-gray-500 dark:text-gray-400 py-8 text-center"
                    {
                        @if filter.is_active()
                        {
                            "No transactions match the current filters."
                        }
                        @else
                        {
                            "No transactions yet. "
                            a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                            {
                                "Add your first one."
                            }
                        }
                    }
                }
                @else
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th class=(TABLE_CELL_STYLE) { "Date" }
                                th class=(TABLE_CELL_STYLE) { "Name" }
                                th class=(TABLE_CELL_STYLE) { "Category" }
                                th class=(TABLE_CELL_STYLE) { "Amount" }
                                th class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }
                        tbody
                        {
                            @for transaction in transactions
                            {
                                (transaction_row(transaction))
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

fn filter_form(filter: &TransactionFilter) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="flex flex-wrap items-end gap-2 mb-4"
        {
            div
            {
                label for="category" class="block mb-1 text-xs font-medium" { "Category" }
                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="all" { "All categories" }
                    @for category in Category::ALL
                    {
                        option
                            value=(category.as_str())
                            selected[filter.category_filter() == Some(category.as_str())]
                        {
                            (category.as_str())
                        }
                    }
                }
            }

            div
            {
                label for="date" class="block mb-1 text-xs font-medium" { "Date" }
                input
                    type="date"
                    name="date"
                    id="date"
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=[filter.date_filter()];
            }

            button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Filter" }

            @if filter.is_active()
            {
                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Clear" }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let edit_url =
        endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id.as_str());
    let delete_url =
        endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id.as_str());

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }
            td class=(TABLE_CELL_STYLE)
            {
                span class="font-medium text-gray-900 dark:text-white" { (transaction.name) }
                @if !transaction.notes.is_empty()
                {
                    br;
                    span class="text-xs text-gray-500 dark:text-gray-400" { (transaction.notes) }
                }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE)
            {
                (directed_amount_span(transaction.amount, transaction.transaction_type))
            }
            td class=(TABLE_CELL_STYLE)
            {
                a href=(edit_url) class=(LINK_STYLE) { "Edit" }
                " "
                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-confirm="Are you sure you want to delete this transaction?"
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                {
                    "Delete"
                }
            }
        }
    }
}
