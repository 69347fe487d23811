//! Newtype wrappers around the backend's integer identifiers.
//!
//! Using distinct types prevents accidentally passing a `FileId` where a
//! `FolderId` is expected. The backend numbers every entity with a plain
//! integer, so each wrapper is serde-transparent over `i64`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create an identifier from a raw backend value.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Return the raw backend value.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a folder. `0` is the synthetic root.
    FolderId
);

define_id!(
    /// Identifier of a file.
    FileId
);

define_id!(
    /// Identifier of a tenant file system.
    FileSystemId
);

impl FolderId {
    /// The synthetic root folder. Never a real node id.
    pub const ROOT: FolderId = FolderId(0);

    /// Whether this id denotes the synthetic root.
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}
