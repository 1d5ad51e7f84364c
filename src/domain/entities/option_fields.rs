use serde::{Deserialize, Deserializer};

/// Tri-state field for PATCH requests.
///
/// - `Unchanged` → field absent from the body, keep the stored value
/// - `SetToNull` → explicit `null`, clear the stored value
/// - `SetToValue` → overwrite with the provided value
#[derive(Debug, Clone, PartialEq)]
pub enum OptionField<T> {
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<T> Default for OptionField<T> {
    fn default() -> Self {
        OptionField::Unchanged
    }
}

// `#[serde(default)]` on the containing struct turns an absent key into
// `Unchanged`; this impl only ever sees present keys.
impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => OptionField::SetToValue(value),
            None => OptionField::SetToNull,
        })
    }
}

impl<T> OptionField<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// Nested-option view: `None` → unchanged, `Some(None)` → clear,
    /// `Some(Some(v))` → set.
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(v) => Some(Some(v)),
        }
    }

    /// Applies the field to a stored `Option<T>`.
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Self::Unchanged => {}
            Self::SetToNull => *target = None,
            Self::SetToValue(v) => *target = Some(v),
        }
    }
}

impl<T> OptionField<Vec<T>> {
    /// Applies the field to a stored list; `null` empties it.
    pub fn apply_to_vec(self, target: &mut Vec<T>) {
        match self {
            Self::Unchanged => {}
            Self::SetToNull => target.clear(),
            Self::SetToValue(v) => *target = v,
        }
    }
}
