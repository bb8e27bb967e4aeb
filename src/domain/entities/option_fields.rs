use serde::{Deserialize, Deserializer};

/// Represents optional field semantics in PATCH/UPDATE requests.
///
/// - `Unchanged` → field absent from the payload
/// - `SetToNull` → explicitly `null`
/// - `SetToValue` → set to provided value
///
/// Use with `#[serde(default)]` on the containing struct so that absent
/// fields fall back to `Unchanged`.
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
    /// True when `Unchanged`.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// The value to write for a touched column, `None` meaning SQL `NULL`.
    pub fn flatten_ref(&self) -> Option<&T> {
        match self {
            OptionField::SetToValue(v) => Some(v),
            _ => None
        }
    }
}

impl<T: Clone> OptionField<T> {
    pub fn flatten_cloned(&self) -> Option<T> {
        self.flatten_ref().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Patch {
        phone: OptionField<String>,
        year: OptionField<i32>,
        address: OptionField<String>,
    }

    #[test]
    fn absent_null_and_value_are_distinguished() {
        let patch: Patch = serde_json::from_str(r#"{"phone": null, "year": 2021}"#).unwrap();

        assert_eq!(patch.phone, OptionField::SetToNull);
        assert_eq!(patch.year, OptionField::SetToValue(2021));
        assert!(patch.address.is_unchanged());
    }

    #[test]
    fn flatten_maps_null_and_unchanged_to_none() {
        assert_eq!(OptionField::<i32>::SetToNull.flatten_cloned(), None);
        assert_eq!(OptionField::<i32>::Unchanged.flatten_cloned(), None);
        assert_eq!(OptionField::SetToValue(7).flatten_cloned(), Some(7));
    }
}
