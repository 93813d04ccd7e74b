//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `CostLineId` where an
//! `EvaluationRowId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Creates an ID from a raw integer. Handy for fixtures.
            #[must_use]
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
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

typed_id!(ProjectId, "Unique identifier for a project.");
typed_id!(StakeholderId, "Unique identifier for a project stakeholder.");
typed_id!(CostLineId, "Unique identifier for a cost plan line item.");
typed_id!(DisciplineId, "Unique identifier for a consultant discipline.");
typed_id!(TradeId, "Unique identifier for a contractor trade.");
typed_id!(AllocationId, "Unique identifier for a contract allocation.");
typed_id!(VariationId, "Unique identifier for a variation.");
typed_id!(InvoiceId, "Unique identifier for an invoice.");
typed_id!(EvaluationId, "Unique identifier for a tender evaluation.");
typed_id!(
    EvaluationPriceId,
    "Unique identifier for one pricing pass within an evaluation."
);
typed_id!(EvaluationRowId, "Unique identifier for an evaluation row.");
typed_id!(FirmId, "Unique identifier for a tendering firm.");
typed_id!(SnapshotId, "Unique identifier for a cost plan snapshot.");
