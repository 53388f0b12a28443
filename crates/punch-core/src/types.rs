//! Core identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided identifier was negative.
    #[error("{field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: i32 },
}

/// Generates an integer ID newtype with common trait implementations.
macro_rules! define_int_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new ID after validation.
            pub const fn new(id: i32) -> Result<Self, ValidationError> {
                if id < 0 {
                    return Err(ValidationError::Negative {
                        field: $field_name,
                        value: id,
                    });
                }
                Ok(Self(id))
            }

            /// Returns the raw integer value.
            #[must_use]
            pub const fn value(self) -> i32 {
                self.0
            }

            /// Whether this ID refers to something (non-negative).
            #[must_use]
            pub const fn is_valid(self) -> bool {
                self.0 >= 0
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_int_id!(
    /// Identifier of a trackable task.
    ///
    /// The default value is [`TaskId::NONE`], which no valid event may reference.
    TaskId, "task ID"
);

define_int_id!(
    /// Identifier of a recorded event, unique within one installation.
    EventId, "event ID"
);

define_int_id!(
    /// Identifier of the machine an event was recorded on.
    ///
    /// Disambiguates events merged from several installations.
    InstallationId, "installation ID"
);

impl TaskId {
    /// Placeholder for "no task assigned".
    pub const NONE: Self = Self(-1);
}

impl Default for TaskId {
    fn default() -> Self {
        Self::NONE
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self(0)
    }
}

impl Default for InstallationId {
    fn default() -> Self {
        Self(0)
    }
}
