//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{
    AppState,
    auth::{get_log_in_page, get_log_out, post_log_in},
    endpoints,
    export::{get_csv_export, get_pdf_export},
    home::get_home_page,
    not_found::get_404_not_found,
    reports::get_reports_page,
    transaction::{
        create_transaction, delete_transaction, get_edit_transaction_page,
        get_new_transaction_page, get_transactions_page, update_transaction,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::NEW_TRANSACTION_VIEW, get(get_new_transaction_page))
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(endpoints::EXPORT_CSV, get(get_csv_export))
        .route(endpoints::EXPORT_PDF, get(get_pdf_export))
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::POST_TRANSACTION, post(create_transaction))
        .route(endpoints::PUT_TRANSACTION, put(update_transaction))
        .route(endpoints::DELETE_TRANSACTION, delete(delete_transaction))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{AppState, endpoints};

    use super::build_router;

    fn test_server() -> TestServer {
        let state = AppState::new("42", "Africa/Algiers".to_owned(), None);
        let app = build_router(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn page_routes_respond_with_ok() {
        let server = test_server();

        for endpoint in [
            endpoints::ROOT,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::NEW_TRANSACTION_VIEW,
            endpoints::REPORTS_VIEW,
            endpoints::LOG_IN_VIEW,
        ] {
            let response = server.get(endpoint).await;

            assert_eq!(
                response.status_code(),
                StatusCode::OK,
                "expected 200 OK for {endpoint}"
            );
        }
    }

    #[tokio::test]
    async fn unknown_route_returns_not_found_page() {
        let server = test_server();

        let response = server.get("/does-not-exist").await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        response.assert_text_contains("404");
    }

    #[tokio::test]
    async fn created_transaction_shows_up_on_the_transactions_page() {
        let server = test_server();

        let response = server
            .post(endpoints::POST_TRANSACTION)
            .form(&[
                ("name", "Electric bill"),
                ("amount", "1500"),
                ("date", "2024-03-05"),
                ("category", "Utilities"),
                ("type", "expense"),
                ("notes", ""),
            ])
            .await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

        let page = server.get(endpoints::TRANSACTIONS_VIEW).await;

        page.assert_status_ok();
        page.assert_text_contains("Electric bill");
        page.assert_text_contains("1,500.00 DZD");
    }

    #[tokio::test]
    async fn invalid_transaction_form_returns_unprocessable_entity() {
        let server = test_server();

        let response = server
            .post(endpoints::POST_TRANSACTION)
            .form(&[
                ("name", ""),
                ("amount", "10"),
                ("date", "2024-03-05"),
                ("category", "Utilities"),
                ("type", "expense"),
                ("notes", ""),
            ])
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
