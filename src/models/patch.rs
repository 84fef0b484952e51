// src/models/patch.rs

use serde::{Deserialize, Deserializer};

/// Deserialize a present field into `Some`, so that `Option<Option<T>>`
/// distinguishes a missing key (`None`) from an explicit `null` (`Some(None)`).
/// Pair with `#[serde(default)]`.
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Split a nullable-column patch into a "touched" flag and the new value.
/// Bind both into `col = CASE WHEN $flag THEN $value ELSE col END` so the
/// merge happens inside the UPDATE statement.
pub fn split<T>(patch: Option<Option<T>>) -> (bool, Option<T>) {
    match patch {
        Some(value) => (true, value),
        None => (false, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "present")]
        caption: Option<Option<String>>,
    }

    #[test]
    fn test_missing_null_and_value_are_distinct() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.caption, None);

        let cleared: Patch = serde_json::from_str(r#"{"caption": null}"#).unwrap();
        assert_eq!(cleared.caption, Some(None));

        let set: Patch = serde_json::from_str(r#"{"caption": "hello"}"#).unwrap();
        assert_eq!(set.caption, Some(Some("hello".to_string())));
    }

    #[test]
    fn test_split() {
        assert_eq!(split::<i32>(None), (false, None));
        assert_eq!(split::<i32>(Some(None)), (true, None));
        assert_eq!(split(Some(Some(2))), (true, Some(2)));
    }
}
