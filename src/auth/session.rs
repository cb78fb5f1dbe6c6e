//! The extractor that reads the signed-in identity, if any, from the
//! session cookie.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use super::cookie::COOKIE_EMAIL;

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The email the remote store keys transaction ownership by.
    pub email: String,
}

/// The session attached to a request.
///
/// `None` means the visitor is browsing anonymously, which is allowed
/// everywhere; pages then render from the local cache and mutations stay
/// local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession(pub Option<Identity>);

impl AuthSession {
    /// The email to key remote store calls by, if signed in.
    pub fn owner_email(&self) -> Option<&str> {
        self.0.as_ref().map(|identity| identity.email.as_str())
    }
}

impl<S> FromRequestParts<S> for AuthSession
where
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;

        let identity = jar
            .get(COOKIE_EMAIL)
            .map(|cookie| cookie.value().to_owned())
            .filter(|email| !email.is_empty() && email != "deleted")
            .map(|email| Identity { email });

        Ok(AuthSession(identity))
    }
}
