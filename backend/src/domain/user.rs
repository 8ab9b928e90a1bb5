//! Users as seen by this service.
//!
//! Users are created and managed elsewhere; events only reference them by
//! identifier and expose their public contact fields on event detail.

use std::fmt;

use thiserror::Error;

/// Raised when a user identifier is not a positive 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user id {0} is not a positive integer")]
pub struct InvalidUserId(pub i64);

/// Identifier of an externally managed user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i32);

impl UserId {
    pub fn new(raw: i64) -> Result<Self, InvalidUserId> {
        i32::try_from(raw)
            .ok()
            .filter(|id| *id > 0)
            .map(Self)
            .ok_or(InvalidUserId(raw))
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Public projection of a user registered for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}
