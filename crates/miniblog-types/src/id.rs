use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw integer id.
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// The raw integer value.
            pub const fn get(self) -> u64 {
                self.0
            }

            /// The id assigned after `existing`: `max + 1`, or `1` when empty.
            ///
            /// Computed fresh from whatever ids are currently present, so an
            /// id is only ever reused if the highest one has been removed.
            /// Fails if the highest id is already `u64::MAX`.
            pub fn next_after<I>(existing: I) -> Result<Self, TypeError>
            where
                I: IntoIterator<Item = Self>,
            {
                match existing.into_iter().max() {
                    None => Ok(Self(1)),
                    Some(max) => max.0.checked_add(1).map(Self).ok_or(TypeError::IdsExhausted {
                        kind: $kind,
                        max: max.0,
                    }),
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw: u64 = s.trim().parse().map_err(|_| TypeError::InvalidId {
                    kind: $kind,
                    input: s.to_string(),
                })?;
                if raw == 0 {
                    return Err(TypeError::ZeroId { kind: $kind });
                }
                Ok(Self(raw))
            }
        }
    };
}

record_id!(
    /// Identifier of a [`Blog`](crate::Blog), unique across the collection.
    BlogId,
    "blog"
);

record_id!(
    /// Identifier of a [`Comment`](crate::Comment), unique only within its
    /// parent blog.
    CommentId,
    "comment"
);
