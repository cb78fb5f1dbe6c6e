//! The reports page: category breakdown and monthly totals charts.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, endpoints,
    auth::AuthSession,
    html::{HeadElement, base, link},
    navigation::NavBar,
    remote::{RemoteFailureLog, RemoteStore, sync_from_remote},
    reports::charts::{
        ReportChart, category_breakdown_chart, charts_script, charts_view, monthly_totals_chart,
    },
    transaction::TransactionLedger,
};

/// The state needed to show the reports page.
#[derive(Clone)]
pub struct ReportsState {
    pub ledger: TransactionLedger,
    pub remote: Option<Arc<dyn RemoteStore>>,
    pub failures: RemoteFailureLog,
}

impl FromRef<AppState> for ReportsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            remote: state.remote.clone(),
            failures: state.failures.clone(),
        }
    }
}

/// Display charts summarizing the user's transactions.
pub async fn get_reports_page(
    State(state): State<ReportsState>,
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
    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW).with_identity(session.owner_email());

    if transactions.is_empty() {
        return reports_no_data_view(nav_bar).into_response();
    }

    // The chart options are serialized to JSON for ECharts consumption.
    let charts = [
        ReportChart {
            id: "category-breakdown-chart",
            options: category_breakdown_chart(&transactions).to_string(),
        },
        ReportChart {
            id: "monthly-totals-chart",
            options: monthly_totals_chart(&transactions).to_string(),
        },
    ];

    reports_view(nav_bar, &charts).into_response()
}

fn reports_view(nav_bar: NavBar, charts: &[ReportChart]) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="reports-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (charts_view(charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(
            "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js".to_owned(),
        ),
        charts_script(charts),
    ];

    base("Reports", &scripts, &content)
}

fn reports_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you have some data.
                Get started by " (new_transaction_link) "."
            }
        }
    );

    base("Reports", &[], &content)
}
