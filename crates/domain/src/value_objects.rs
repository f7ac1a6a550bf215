//! Tri-state field wrapper for partial updates.
//!
//! A PUT payload must distinguish "field omitted" (keep the stored value)
//! from "field present but null" (clear it). Collapsing both into `None`
//! makes clearing `fecha_vencimiento` unreachable, so incoming payloads wrap
//! every field in [`PatchField`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PatchField<T> {
    /// Field present with a value.
    Set(T),
    /// Field present and explicitly null.
    Null,
    /// Field absent from the payload.
    #[default]
    Omitted,
}

impl<T> PatchField<T> {
    pub fn is_provided(&self) -> bool {
        !matches!(self, PatchField::Omitted)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PatchField::Null)
    }

    /// The value if the field was provided non-null.
    pub fn value(&self) -> Option<&T> {
        match self {
            PatchField::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Apply to a stored value: `Set` replaces, `Null` clears, `Omitted` keeps.
    pub fn apply_to(self, existing: Option<T>) -> Option<T> {
        match self {
            PatchField::Set(value) => Some(value),
            PatchField::Null => None,
            PatchField::Omitted => existing,
        }
    }

    /// Fill an omitted field with a default, leaving `Set` and `Null` alone.
    pub fn or_set(self, default: T) -> Self {
        match self {
            PatchField::Omitted => PatchField::Set(default),
            other => other,
        }
    }

    pub fn map<U, F>(self, f: F) -> PatchField<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            PatchField::Set(value) => PatchField::Set(f(value)),
            PatchField::Null => PatchField::Null,
            PatchField::Omitted => PatchField::Omitted,
        }
    }

    /// Like [`map`](Self::map) but the conversion may fail.
    pub fn try_map<U, E, F>(self, f: F) -> Result<PatchField<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        Ok(match self {
            PatchField::Set(value) => PatchField::Set(f(value)?),
            PatchField::Null => PatchField::Null,
            PatchField::Omitted => PatchField::Omitted,
        })
    }
}

// Only invoked when the key is present in the payload, so JSON null maps to
// `Null` and a missing key falls back to the `Default` impl (`Omitted`).
// Payload structs must tag these fields with #[serde(default)].
impl<'de, T> Deserialize<'de> for PatchField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => PatchField::Set(value),
            None => PatchField::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        campo: PatchField<String>,
    }

    #[test]
    fn test_deserialize_present_value() {
        let payload: Payload = serde_json::from_str(r#"{"campo": "hola"}"#).unwrap();
        assert_eq!(payload.campo, PatchField::Set("hola".to_string()));
    }

    #[test]
    fn test_deserialize_explicit_null() {
        let payload: Payload = serde_json::from_str(r#"{"campo": null}"#).unwrap();
        assert_eq!(payload.campo, PatchField::Null);
    }

    #[test]
    fn test_deserialize_missing_key() {
        let payload: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.campo, PatchField::Omitted);
    }

    #[test]
    fn test_apply_to() {
        let existing = Some("antes".to_string());
        assert_eq!(
            PatchField::Set("después".to_string()).apply_to(existing.clone()),
            Some("después".to_string())
        );
        assert_eq!(PatchField::<String>::Null.apply_to(existing.clone()), None);
        assert_eq!(PatchField::<String>::Omitted.apply_to(existing.clone()), existing);
        assert_eq!(PatchField::<String>::Omitted.apply_to(None), None);
    }

    #[test]
    fn test_or_set_only_fills_omitted() {
        assert_eq!(PatchField::Omitted.or_set(1), PatchField::Set(1));
        assert_eq!(PatchField::Set(2).or_set(1), PatchField::Set(2));
        assert_eq!(PatchField::<i64>::Null.or_set(1), PatchField::Null);
    }

    #[test]
    fn test_value_and_flags() {
        let set = PatchField::Set(5);
        assert!(set.is_provided());
        assert!(!set.is_null());
        assert_eq!(set.value(), Some(&5));

        let null = PatchField::<i64>::Null;
        assert!(null.is_provided());
        assert!(null.is_null());
        assert_eq!(null.value(), None);

        let omitted = PatchField::<i64>::Omitted;
        assert!(!omitted.is_provided());
        assert_eq!(omitted.value(), None);
    }

    #[test]
    fn test_try_map_propagates_error() {
        let parsed = PatchField::Set("12".to_string()).try_map(|s| s.parse::<i64>());
        assert_eq!(parsed.unwrap(), PatchField::Set(12));

        let failed = PatchField::Set("doce".to_string()).try_map(|s| s.parse::<i64>());
        assert!(failed.is_err());

        let null = PatchField::<String>::Null.try_map(|s| s.parse::<i64>());
        assert_eq!(null.unwrap(), PatchField::Null);
    }
}
