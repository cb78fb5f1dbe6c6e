//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The auth module handles the lower level session cookie logic.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::{
    Form, PrivateCookieJar,
    cookie::Key,
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, form_card, loading_spinner},
};

use super::cookie::set_session_cookie;

fn log_in_form(email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="email" class=(FORM_LABEL_STYLE)
                {
                    "Email"
                }

                input
                    type="email"
                    name="email"
                    id="email"
                    placeholder="you@example.com"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus
                    value=(email);

                @if let Some(error_message) = error_message
                {
                    p class="text-red-500 text-base" { (error_message) }
                }
            }

            button
                type="submit" id="submit-button" tabindex="0"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Log in"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Signing in links your transactions to your email so they sync \
                across devices. Without it, everything stays on this server only."
            }
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page() -> Response {
    let content = form_card("Log in to sync your transactions", &log_in_form("", None));
    base("Log In", &[], &content).into_response()
}

/// The state needed to perform a log-in.
#[derive(Debug, Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which session cookies are valid.
    pub cookie_duration: Duration,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for logging in.
#[derive(Debug, Deserialize)]
pub struct LogInForm {
    /// The email to key remote transaction ownership by.
    pub email: String,
}

/// Handler for log-in requests via the POST method.
///
/// On success the session cookie is set and the client is redirected to the
/// home page. Otherwise, the form is returned with an error message
/// explaining the problem.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(form): Form<LogInForm>,
) -> Response {
    let email = form.email.trim();

    if email.is_empty() || !email.contains('@') {
        let form = log_in_form(email, Some("Enter a valid email address."));
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            form_card("Log in to sync your transactions", &form),
        )
            .into_response();
    }

    let jar = set_session_cookie(jar, email, state.cookie_duration);

    (
        jar,
        HxRedirect(endpoints::ROOT.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
