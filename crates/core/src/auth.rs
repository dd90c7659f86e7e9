use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Stable user identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into().trim().to_owned();
        if value.is_empty() {
            return Err(AppError::Validation("user id must not be empty".to_owned()));
        }

        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// The user performing the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    user_id: UserId,
    display_name: String,
}

impl ActorIdentity {
    /// Creates an actor identity from identity provider data.
    #[must_use]
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }
}
