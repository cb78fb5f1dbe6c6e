//! The home page: balance summary cards and recent activity.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    aggregation::{balance, total_expense, total_income},
    auth::AuthSession,
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base, directed_amount_span, format_amount},
    navigation::NavBar,
    remote::{RemoteFailureLog, RemoteStore, sync_from_remote},
    transaction::{Transaction, TransactionLedger},
};

/// How many transactions the recent activity list shows.
const RECENT_TRANSACTION_COUNT: usize = 5;

/// The state needed to show the home page.
#[derive(Clone)]
pub struct HomePageState {
    pub ledger: TransactionLedger,
    pub remote: Option<Arc<dyn RemoteStore>>,
    pub failures: RemoteFailureLog,
}

impl FromRef<AppState> for HomePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            remote: state.remote.clone(),
            failures: state.failures.clone(),
        }
    }
}

/// Render the home page with income, expense and balance cards and the
/// most recently added transactions.
pub async fn get_home_page(
    State(state): State<HomePageState>,
    session: AuthSession,
) -> Response {
    sync_from_remote(
        session.owner_email(),
        state.remote.as_ref(),
        &state.ledger,
        &state.failures,
    )
    .await;

    let transactions = state.ledger.snapshot();

    let nav_bar = NavBar::new(endpoints::ROOT)
        .with_identity(session.owner_email())
        .into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-4xl"
            {
                div class="grid grid-cols-1 sm:grid-cols-3 gap-4 mb-8"
                {
                    (summary_card("Income", format_amount(total_income(&transactions)), "text-green-600 dark:text-green-400"))
                    (summary_card("Expenses", format_amount(total_expense(&transactions)), "text-red-600 dark:text-red-400"))
                    (summary_card("Balance", format_amount(balance(&transactions)), "text-indigo-600 dark:text-indigo-400"))
                }

                div class="flex items-center justify-between mb-4"
                {
                    h2 class="text-xl font-bold" { "Recent activity" }
                    a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "See all" }
                }

                (recent_activity(&transactions))
            }
        }
    };

    base("Home", &[], &content).into_response()
}

fn summary_card(title: &str, amount: String, amount_style: &str) -> Markup {
    html! {
        div class="bg-white dark:bg-gray-800 rounded-lg shadow p-6"
        {
            p class="text-sm font-medium text-gray-500 dark:text-gray-400 mb-1" { (title) }
            p class=(format!("text-2xl font-bold {amount_style}")) { (amount) }
        }
    }
}

fn recent_activity(transactions: &[Transaction]) -> Markup {
    // Insertion order is oldest first, so the newest entries are at the end.
    let recent = transactions.iter().rev().take(RECENT_TRANSACTION_COUNT);

    html! {
        @if transactions.is_empty()
        {
            p id="empty-state" class="text-gray-500 dark:text-gray-400"
            {
                "Nothing here yet. "
                a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                {
                    "Add your first transaction."
                }
            }
        }
        @else
        {
            ul id="recent-activity" class="divide-y divide-gray-200 dark:divide-gray-700 bg-white dark:bg-gray-800 rounded-lg shadow"
            {
                @for transaction in recent
                {
                    li class="flex items-center justify-between px-6 py-3"
                    {
                        div
                        {
                            p class="font-medium text-gray-900 dark:text-white" { (transaction.name) }
                            p class="text-xs text-gray-500 dark:text-gray-400"
                            {
                                (transaction.date) " · " (transaction.category)
                            }
                        }
                        (directed_amount_span(transaction.amount, transaction.transaction_type))
                    }
                }
            }
        }
    }
}
