//! Downloads of the transaction list as CSV or PDF.
//!
//! Both endpoints accept the same filter query as the transactions page so
//! that the downloaded file matches what the user is looking at.

mod csv;
mod pdf;

pub use csv::transactions_to_csv;
pub use pdf::transactions_to_pdf;

use axum::{
    extract::{FromRef, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use time::{Date, OffsetDateTime, macros::format_description};

use crate::{
    AppState, Error,
    timezone::get_local_offset,
    transaction::{TransactionFilter, TransactionLedger, filter_transactions},
};

/// The state needed to build a transaction export.
#[derive(Debug, Clone)]
pub struct ExportState {
    pub ledger: TransactionLedger,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Algiers".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for downloading the filtered transaction list as CSV.
pub async fn get_csv_export(
    State(state): State<ExportState>,
    Query(filter): Query<TransactionFilter>,
) -> Response {
    let transactions = filter_transactions(state.ledger.snapshot(), &filter);

    let today = match local_date(&state.local_timezone) {
        Ok(date) => date,
        Err(error) => return error.into_response(),
    };

    match transactions_to_csv(&transactions) {
        Ok(document) => download_response(document, "text/csv", "csv", today),
        Err(error) => {
            tracing::error!("could not encode CSV export: {error}");
            error.into_response()
        }
    }
}

/// A route handler for downloading the filtered transaction list as PDF.
pub async fn get_pdf_export(
    State(state): State<ExportState>,
    Query(filter): Query<TransactionFilter>,
) -> Response {
    let transactions = filter_transactions(state.ledger.snapshot(), &filter);

    let today = match local_date(&state.local_timezone) {
        Ok(date) => date,
        Err(error) => return error.into_response(),
    };

    match transactions_to_pdf(&transactions, today) {
        Ok(document) => download_response(document, "application/pdf", "pdf", today),
        Err(error) => {
            tracing::error!("could not encode PDF export: {error}");
            error.into_response()
        }
    }
}

fn local_date(local_timezone: &str) -> Result<Date, Error> {
    let offset = get_local_offset(local_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(local_timezone.to_owned()))?;

    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}

fn download_response(
    document: Vec<u8>,
    content_type: &'static str,
    extension: &str,
    date: Date,
) -> Response {
    let date_string = date
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string());
    let disposition =
        format!("attachment; filename=\"masroofy-transactions-{date_string}.{extension}\"");

    (
        [
            (CONTENT_TYPE, content_type.to_owned()),
            (CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response()
}
