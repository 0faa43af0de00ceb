//! Explicit session state for the signed-in user.
//!
//! The embedding UI owns a [`Session`] value and passes it to the services
//! that need authentication. Services clear it whenever the API answers
//! with 401, so an expired token cannot be replayed on later calls.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::{NonEmptyString, TypeConstraintError};

/// Opaque bearer token issued by `POST /user/login`.
///
/// The token is never inspected locally. Debug output redacts the value so
/// it cannot leak into logs.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a non-empty token string.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let inner = NonEmptyString::new(value)?;
        Ok(Self(inner.into_inner()))
    }

    /// Borrow the raw token, e.g. for an `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned token.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl TryFrom<String> for AccessToken {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for AccessToken {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

/// Authentication state of the current user.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    token: Option<AccessToken>,
}

impl Session {
    /// A session with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session already holding a token, e.g. restored from disk.
    #[must_use]
    pub fn with_token(token: AccessToken) -> Self {
        Self { token: Some(token) }
    }

    /// Stores the token obtained from a successful login.
    pub fn sign_in(&mut self, token: AccessToken) {
        self.token = Some(token);
    }

    /// Drops the stored token. Called on logout and on any 401 response.
    pub fn sign_out(&mut self) {
        self.token = None;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.token {
            Some(_) => write!(f, "authenticated"),
            None => write!(f, "anonymous"),
        }
    }
}
