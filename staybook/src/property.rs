//! Property catalog.
//!
//! Properties are owned outside the engine; the engine only reads the facts
//! it needs to price and validate a stay through the [`PropertyCatalog`]
//! trait.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pricing::Money;
use crate::reservation::ValidationError;

/// Identifier of a rental property.
///
/// # Examples
///
/// ```
/// use staybook::PropertyId;
///
/// let id = PropertyId::new("  lakeside-cabin ").unwrap();
/// assert_eq!(id.as_str(), "lakeside-cabin");
/// assert!(PropertyId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyId(String);

impl PropertyId {
    /// Creates an identifier from a non-empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty after trimming whitespace.
    pub fn new(value: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "property".into(),
                message: "property id must be non-empty".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PropertyId {
    type Error = ValidationError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PropertyId> for String {
    fn from(id: PropertyId) -> Self {
        id.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Facts about a property that the engine prices and validates against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Catalog identifier.
    pub id: PropertyId,
    /// Human-readable name.
    #[serde(default)]
    pub name: Option<String>,
    /// Price per night, in currency minor units.
    pub nightly_rate: Money,
    /// Maximum number of guests.
    pub max_guests: u32,
    /// Whether guests may bring pets.
    #[serde(default)]
    pub pet_friendly: bool,
    /// Per-pet fee overriding the pricing policy default.
    #[serde(default)]
    pub pet_fee: Option<Money>,
}

impl Property {
    /// Creates a property with no name, no pets and the default pet fee.
    #[must_use]
    pub fn new(id: PropertyId, nightly_rate: Money, max_guests: u32) -> Self {
        Self {
            id,
            name: None,
            nightly_rate,
            max_guests,
            pet_friendly: false,
            pet_fee: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Marks the property as pet friendly.
    #[must_use]
    pub const fn with_pets_allowed(mut self, allowed: bool) -> Self {
        self.pet_friendly = allowed;
        self
    }

    /// Overrides the per-pet fee for this property.
    #[must_use]
    pub const fn with_pet_fee(mut self, fee: Money) -> Self {
        self.pet_fee = Some(fee);
        self
    }

    /// Checks the property definition itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the property cannot host anyone or is free.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.max_guests == 0 {
            return Err(ValidationError {
                field: format!("properties.{}.max_guests", self.id),
                message: "must be at least 1".into(),
            });
        }
        if self.nightly_rate.is_zero() {
            return Err(ValidationError {
                field: format!("properties.{}.nightly_rate", self.id),
                message: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

/// Read access to property facts.
#[cfg_attr(test, mockall::automock)]
pub trait PropertyCatalog: Send + Sync {
    /// Looks up a property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids and
    /// [`Error::Unavailable`] if the catalog cannot be reached.
    fn get_property(&self, id: &PropertyId) -> Result<Property>;
}

/// A catalog held in memory, typically loaded from configuration.
///
/// # Examples
///
/// ```
/// use staybook::{InMemoryCatalog, Money, Property, PropertyCatalog, PropertyId};
///
/// let id = PropertyId::new("cabin").unwrap();
/// let catalog = InMemoryCatalog::new();
/// catalog.insert(Property::new(id.clone(), Money::from_minor(5000), 4));
///
/// assert_eq!(catalog.get_property(&id).unwrap().max_guests, 4);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    properties: RwLock<HashMap<PropertyId, Property>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a property.
    pub fn insert(&self, property: Property) {
        let mut properties = self
            .properties
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        properties.insert(property.id.clone(), property);
    }

    /// Number of properties in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<Property> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let catalog = Self::new();
        for property in iter {
            catalog.insert(property);
        }
        catalog
    }
}

impl PropertyCatalog for InMemoryCatalog {
    fn get_property(&self, id: &PropertyId) -> Result<Property> {
        self.properties
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                resource: format!("property {id}"),
            })
    }
}
