//! Typed ID wrappers for compile-time type safety.
//!
//! Stored ids are opaque strings: seeded records use short numeric ids and
//! fresh records get a time-ordered UUIDv7, so ids sort by creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate typed ID wrappers with common trait implementations.
macro_rules! typed_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new timestamp-derived ID.
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for an identity.");
typed_id!(DepartmentId, "Unique identifier for a department.");
typed_id!(AttendanceId, "Unique identifier for an attendance record.");
typed_id!(LeaveRequestId, "Unique identifier for a leave request.");
typed_id!(DailyReportId, "Unique identifier for a daily report.");
typed_id!(WeeklyReportId, "Unique identifier for a weekly report.");
typed_id!(ProjectId, "Unique identifier for a project.");
