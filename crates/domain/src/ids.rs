use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned numeric identifiers.
///
/// Ids are handed out by the catalog store on insert and never change
/// afterwards, so there is no `new()` that mints one locally.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(HeroId);
define_id!(SuperpowerId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_as_plain_numbers() {
        assert_eq!(HeroId::new(42).to_string(), "42");
        assert_eq!(SuperpowerId::from(7).to_string(), "7");
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&HeroId::new(3)).unwrap();
        assert_eq!(json, "3");

        let id: SuperpowerId = serde_json::from_str("12").unwrap();
        assert_eq!(i64::from(id), 12);
    }

    #[test]
    fn ids_order_by_value() {
        let mut ids = vec![SuperpowerId::new(3), SuperpowerId::new(1), SuperpowerId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![SuperpowerId::new(1), SuperpowerId::new(2), SuperpowerId::new(3)]);
    }
}
