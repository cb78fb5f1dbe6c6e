//! Cookie-based sign-in.
//!
//! Signing in only attaches an owner email to the browser session so that
//! transactions sync with the remote store. Every page works without
//! signing in; the app then runs on the local cache alone.

mod cookie;
mod log_in;
mod log_out;
mod session;

pub use cookie::DEFAULT_COOKIE_DURATION;
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use session::AuthSession;

#[cfg(test)]
pub use cookie::{COOKIE_EMAIL, invalidate_session_cookie, set_session_cookie};
#[cfg(test)]
pub use session::Identity;
