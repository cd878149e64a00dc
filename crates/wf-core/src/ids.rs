//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// The ID following `self`.  Wraps before reaching `INVALID`.
            #[inline]
            pub fn next(self) -> Self {
                let n = self.0.wrapping_add(1);
                if n == <$inner>::MAX { $name(0) } else { $name(n) }
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identifies one `RouteOption` within the option set that produced it.
    /// Ids are never reused within a session, so a stale id from a previous
    /// resolution is rejected rather than selecting the wrong option.
    pub struct OptionId(u32);
}

typed_id! {
    /// Monotonic counter tagging each route-resolution request of a session.
    pub struct RequestId(u64);
}
