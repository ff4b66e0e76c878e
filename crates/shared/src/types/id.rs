//! Typed IDs for type-safe entity references.
//!
//! A `LedgerId` can never be handed to something expecting an `AccountId`,
//! even though both wrap a UUID.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a typed UUID wrapper.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new time-ordered ID (UUID v7).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Identifier of the user acting on an entry.");
typed_id!(OrganizationId, "Identifier of the organizational unit that owns an entry.");
typed_id!(AccountId, "Identifier of a chart of accounts entry (cuenta).");
typed_id!(LedgerId, "Identifier of an account's general ledger (libro mayor).");
typed_id!(JournalEntryId, "Identifier of a journal entry (asiento).");
typed_id!(TransactionId, "Identifier of a single ledger transaction line.");
typed_id!(FiscalPeriodId, "Identifier of an accounting period.");
