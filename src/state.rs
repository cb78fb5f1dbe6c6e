//! Implements a struct that holds the shared state of the server.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    auth::DEFAULT_COOKIE_DURATION,
    remote::{RemoteFailureLog, RemoteStore},
    transaction::TransactionLedger,
};

/// The state of the server.
#[derive(Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Algiers".
    pub local_timezone: String,
    /// The in-memory cache holding the user's transactions.
    pub ledger: TransactionLedger,
    /// The remote document store, if the server was configured with one.
    pub remote: Option<Arc<dyn RemoteStore>>,
    /// Remote writes that did not go through.
    pub failures: RemoteFailureLog,
}

impl AppState {
    /// Create a new [AppState].
    pub fn new(
        cookie_secret: &str,
        local_timezone: String,
        remote: Option<Arc<dyn RemoteStore>>,
    ) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            local_timezone,
            ledger: TransactionLedger::new(),
            remote,
            failures: RemoteFailureLog::new(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
