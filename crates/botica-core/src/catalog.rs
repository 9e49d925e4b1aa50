//! # Catalog
//!
//! The configured sets of allowed units of measure and storage locations.
//!
//! ## Where the Catalog Comes From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  botica.toml / BOTICA__CATALOG__UNITS                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppConfig.catalog (serde) ── missing? ──► Catalog::default()           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppState.catalog ──► InventoryService create / update / patch          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Matching is case-insensitive on the trimmed input and always yields the
//! canonical spelling from the catalog, so `" Box "` is stored as `"box"`.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Units of measure accepted when no catalog is configured.
pub const DEFAULT_UNITS: &[&str] = &[
    "unit", "box", "package", "tablet", "capsule", "liter", "bottle",
];

/// Storage location codes accepted when no catalog is configured.
///
/// Shelf rows A-C with three bays each, plus cold storage and the back
/// warehouse.
pub const DEFAULT_LOCATIONS: &[&str] = &[
    "A1",
    "A2",
    "A3",
    "B1",
    "B2",
    "B3",
    "C1",
    "C2",
    "C3",
    "REFRIGERATOR",
    "WAREHOUSE",
];

/// Allowed enumerations for product fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Allowed values for `unit_of_measure`.
    pub units: Vec<String>,

    /// Allowed values for `location`.
    pub locations: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            units: DEFAULT_UNITS.iter().map(|s| s.to_string()).collect(),
            locations: DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Catalog {
    /// Validates a required unit of measure.
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::Catalog;
    ///
    /// let catalog = Catalog::default();
    /// assert_eq!(catalog.validate_unit("unidadMedida", " Tablet ").unwrap(), "tablet");
    /// assert!(catalog.validate_unit("unidadMedida", "gallon").is_err());
    /// assert!(catalog.validate_unit("unidadMedida", "  ").is_err());
    /// ```
    pub fn validate_unit(&self, field: &str, raw: &str) -> ValidationResult<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::required(field));
        }

        canonical(&self.units, trimmed).ok_or_else(|| ValidationError::NotAllowed {
            field: field.to_string(),
            allowed: self.units.clone(),
        })
    }

    /// Validates an optional storage location. Blank input means "no
    /// location" and yields `None`.
    pub fn validate_location(&self, field: &str, raw: &str) -> ValidationResult<Option<String>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        canonical(&self.locations, trimmed)
            .map(Some)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: field.to_string(),
                allowed: self.locations.clone(),
            })
    }
}

fn canonical(allowed: &[String], candidate: &str) -> Option<String> {
    allowed
        .iter()
        .find(|value| value.eq_ignore_ascii_case(candidate))
        .cloned()
}

// =============================================================================
// Unit Tests
// =============================================================================
