//! The car entity.
//!
//! A [`Car`] is an immutable value: every repository operation hands back a
//! fresh instance reflecting what the store holds.

use serde::{Deserialize, Serialize};

/// A car in the showroom catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Car {
    /// Identifier assigned by the store on insert; `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    name: String,
    description: String,
}

impl Car {
    /// Create an unsaved car.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
        }
    }

    /// Create a car that carries a store-assigned identifier.
    #[must_use]
    pub fn with_id(id: i64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Start building a car field by field.
    #[must_use]
    pub fn builder() -> CarBuilder {
        CarBuilder::default()
    }

    /// The store-assigned identifier, if this car has been persisted.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// The car's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The car's description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Consume the car, returning its name and description.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.description)
    }
}

/// Named-field builder for [`Car`].
#[derive(Debug, Clone, Default)]
pub struct CarBuilder {
    id: Option<i64>,
    name: String,
    description: String,
}

impl CarBuilder {
    /// Set the identifier.
    #[must_use]
    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Finish the car. Unset text fields are empty.
    #[must_use]
    pub fn build(self) -> Car {
        Car {
            id: self.id,
            name: self.name,
            description: self.description,
        }
    }
}

impl std::fmt::Display for Car {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "#{id} {}: {}", self.name, self.description),
            None => write!(f, "{}: {}", self.name, self.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_car_is_unsaved() {
        let car = Car::new("Model T", "Any colour so long as it is black");
        assert!(car.id().is_none());
        assert_eq!(car.name(), "Model T");
        assert_eq!(car.description(), "Any colour so long as it is black");
    }

    #[test]
    fn test_with_id() {
        let car = Car::with_id(7, "Beetle", "Air-cooled");
        assert_eq!(car.id(), Some(7));
    }

    #[test]
    fn test_builder() {
        let car = Car::builder()
            .id(3)
            .name("Mini")
            .description("Transverse engine")
            .build();
        assert_eq!(car, Car::with_id(3, "Mini", "Transverse engine"));
    }

    #[test]
    fn test_builder_defaults_to_empty_fields() {
        let car = Car::builder().build();
        assert!(car.id().is_none());
        assert_eq!(car.name(), "");
        assert_eq!(car.description(), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(Car::with_id(1, "Saab", "900").to_string(), "#1 Saab: 900");
        assert_eq!(Car::new("Saab", "900").to_string(), "Saab: 900");
    }

    #[test]
    fn test_serialization_omits_missing_id() {
        let json = serde_json::to_string(&Car::new("Volvo", "240")).unwrap();
        assert!(!json.contains("\"id\""));

        let json = serde_json::to_string(&Car::with_id(9, "Volvo", "240")).unwrap();
        assert!(json.contains("\"id\":9"));
    }

    #[test]
    fn test_deserialization() {
        let car: Car =
            serde_json::from_str(r#"{"id": 4, "name": "Lada", "description": "Niva"}"#).unwrap();
        assert_eq!(car, Car::with_id(4, "Lada", "Niva"));

        let car: Car = serde_json::from_str(r#"{"name": "Lada", "description": "Niva"}"#).unwrap();
        assert!(car.id().is_none());
    }

    #[test]
    fn test_into_parts() {
        let (name, description) = Car::new("Fiat", "500").into_parts();
        assert_eq!(name, "Fiat");
        assert_eq!(description, "500");
    }
}
