//! Field-level validation errors
//!
//! [`FieldErrors`] collects one message per field in the order the rules
//! produced them. The first message recorded for a field wins, and the first
//! field recorded overall becomes the headline message of the response.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered `field -> message` map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set holding a single error
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record an error for `field` unless one is already recorded
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if !self.contains(&field) {
            self.entries.push((field, message.into()));
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(f, _)| f == field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First error in rule-evaluation order
    pub fn first(&self) -> Option<(&str, &str)> {
        self.entries
            .first()
            .map(|(f, m)| (f.as_str(), m.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// Append every error from `other` that does not collide with an existing field
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, message) in other.entries {
            self.add(field, message);
        }
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some((_, message)) => f.write_str(message),
            None => f.write_str("Validation failed"),
        }
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field, message)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldErrorsVisitor;

        impl<'de> Visitor<'de> for FieldErrorsVisitor {
            type Value = FieldErrors;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to error messages")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut errors = FieldErrors::new();
                while let Some((field, message)) = access.next_entry::<String, String>()? {
                    errors.add(field, message);
                }
                Ok(errors)
            }
        }

        deserializer.deserialize_map(FieldErrorsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Enter a valid email address.");
        errors.add("email", "This field may not be blank.");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Enter a valid email address."));
    }

    #[test]
    fn test_first_keeps_insertion_order() {
        let mut errors = FieldErrors::new();
        errors.add("name", "This field is required.");
        errors.add("company", "This field is required.");
        assert_eq!(errors.first(), Some(("name", "This field is required.")));
        assert_eq!(errors.to_string(), "This field is required.");
    }

    #[test]
    fn test_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());
        let err = FieldErrors::single("status", "bad").into_result().unwrap_err();
        assert!(err.contains("status"));
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let mut errors = FieldErrors::new();
        errors.add("phone", "Invalid phone number.");
        errors.add("department", "Department must belong to the selected company.");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(
            json,
            r#"{"phone":"Invalid phone number.","department":"Department must belong to the selected company."}"#
        );

        let back: FieldErrors = serde_json::from_str(&json).unwrap();
        assert_eq!(back.first().map(|(f, _)| f), Some("phone"));
    }
}
