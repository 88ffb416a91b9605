//! Typed UUID keys.
//!
//! | type      | primary key of | referenced by                         |
//! |-----------|----------------|---------------------------------------|
//! | `UserId`  | `users`        | `files.owner_id`                      |
//! | `FileId`  | `files`        | `shares.file_id`                      |
//! | `ShareId` | `shares`       |                                       |
//!
//! Every row of `files` is one version, so a `FileId` names a single
//! version and never a file name. Ids travel over HTTP and JSON as the
//! bare hyphenated UUID.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_key {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
        #[cfg_attr(feature = "sqlx", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// A fresh v4 key.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        // Path segments like `/files/{id}` parse through here.
        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_key!(
    /// A registered account.
    UserId
);

uuid_key!(
    /// One stored version of a file.
    FileId
);

uuid_key!(ShareId);
