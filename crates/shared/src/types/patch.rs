//! Presence-aware field for partial updates.
//!
//! A JSON update body can omit a field, send it as `null`, or send a value.
//! `Option<T>` collapses the first two cases, so update inputs use [`Patch`]
//! together with `#[serde(default)]`:
//!
//! ```
//! use serde::Deserialize;
//! use staybook_shared::types::Patch;
//!
//! #[derive(Deserialize)]
//! struct UpdateNotes {
//!     #[serde(default)]
//!     notes: Patch<String>,
//! }
//!
//! let absent: UpdateNotes = serde_json::from_str("{}").unwrap();
//! assert_eq!(absent.notes, Patch::Absent);
//!
//! let cleared: UpdateNotes = serde_json::from_str(r#"{"notes": null}"#).unwrap();
//! assert_eq!(cleared.notes, Patch::Null);
//! ```

use serde::{Deserialize, Deserializer};

/// One field of a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not supplied; keep the stored value.
    Absent,
    /// The field was supplied as `null`; clear the stored value.
    Null,
    /// The field was supplied with a value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Patch<T> {
    /// Returns true unless the field was absent.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Returns the supplied value, if any.
    #[must_use]
    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }

    /// Merges into a nullable stored value.
    #[must_use]
    pub fn merge(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Absent => current,
            Self::Null => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Merges into a required stored value.
    ///
    /// Returns `None` when the patch tries to clear it.
    #[must_use]
    pub fn merge_required(self, current: T) -> Option<T> {
        match self {
            Self::Absent => Some(current),
            Self::Null => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Converts into the `Option<Option<T>>` shape: outer `None` means absent.
    #[must_use]
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Absent => None,
            Self::Null => Some(None),
            Self::Value(v) => Some(Some(v)),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; absence comes from `#[serde(default)]`.
        Option::<T>::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        count: Patch<u32>,
    }

    #[test]
    fn test_deserialize_presence() {
        let body: Body = serde_json::from_str(r#"{"name": null, "count": 3}"#).unwrap();
        assert_eq!(body.name, Patch::Null);
        assert_eq!(body.count, Patch::Value(3));

        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.name, Patch::Absent);
        assert!(!body.count.is_present());
    }

    #[rstest]
    #[case(Patch::Absent, Some(1), Some(1))]
    #[case(Patch::Absent, None, None)]
    #[case(Patch::Null, Some(1), None)]
    #[case(Patch::Value(2), Some(1), Some(2))]
    #[case(Patch::Value(2), None, Some(2))]
    fn test_merge(
        #[case] patch: Patch<i32>,
        #[case] current: Option<i32>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(patch.merge(current), expected);
    }

    #[test]
    fn test_merge_required() {
        assert_eq!(Patch::Absent.merge_required(1), Some(1));
        assert_eq!(Patch::Value(5).merge_required(1), Some(5));
        assert_eq!(Patch::<i32>::Null.merge_required(1), None);
    }

    #[test]
    fn test_into_option() {
        assert_eq!(Patch::<i32>::Absent.into_option(), None);
        assert_eq!(Patch::<i32>::Null.into_option(), Some(None));
        assert_eq!(Patch::Value(7).into_option(), Some(Some(7)));
        assert_eq!(Patch::Value(7).as_value(), Some(&7));
    }
}
