//! Defines the route handler for logging out.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;

use crate::endpoints;

use super::cookie::invalidate_session_cookie;

/// Invalidate the session cookie and redirect to the home page.
///
/// The local transaction cache is left as-is; the next signed-in sync will
/// replace it.
pub async fn get_log_out(jar: PrivateCookieJar) -> Response {
    let jar = invalidate_session_cookie(jar);

    (jar, Redirect::to(endpoints::ROOT)).into_response()
}
