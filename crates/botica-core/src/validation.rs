//! # Validation Module
//!
//! Input validation and lenient numeric coercion for Botica.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: axum extractors                                              │
//! │  └── Malformed JSON / wrong JSON types → 400 before any service runs   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Services (botica-api)                                        │
//! │  ├── THIS MODULE: presence, format, range, lenient numbers             │
//! │  └── Catalog: units of measure, storage locations                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE product code                                               │
//! │  └── Foreign keys (category, supplier, quotation lines)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Numbers
//! Product numeric fields arrive from spreadsheet-style clients as numbers,
//! numeric strings or even booleans. They are coerced the way a browser's
//! `Number()` would, and anything non-numeric falls back to zero:
//!
//! | JSON input     | Coerced |
//! |----------------|---------|
//! | `12`, `"12"`   | 12      |
//! | `" 3.5 "`      | 3.5     |
//! | `true`/`false` | 1 / 0   |
//! | `null`, `""`   | 0       |
//! | `"abc"`, `[]`  | 0       |
//!
//! Quotation quantities and identifiers are NOT lenient: they must be real
//! numbers (or numeric strings).

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ProductStatus;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum product name length.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Wire format for expiration dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Identifiers
// =============================================================================

/// Parses a path identifier.
///
/// ## Rules
/// - Must be a base-10 integer
/// - Must be greater than zero
///
/// ## Example
/// ```rust
/// use botica_core::validation::parse_id;
///
/// assert_eq!(parse_id("id", "42").unwrap(), 42);
/// assert!(parse_id("id", "0").is_err());
/// assert!(parse_id("id", "abc").is_err());
/// ```
pub fn parse_id(field: &str, raw: &str) -> ValidationResult<i64> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, "must be a positive integer"))?;

    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(id)
}

/// Parses a mandatory JSON reference (`proveedorId`, `productoId`).
///
/// Accepts integral JSON numbers and numeric strings; missing or `null`
/// is [`ValidationError::Required`].
pub fn required_reference(field: &str, value: Option<&Value>) -> ValidationResult<i64> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::required(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ValidationError::required(field)),
        Some(value) => {
            let id = strict_number(value)
                .filter(|n| n.fract() == 0.0 && *n <= i64::MAX as f64)
                .ok_or_else(|| ValidationError::invalid_format(field, "must be an integer"))?
                as i64;

            if id <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: field.to_string(),
                });
            }
            Ok(id)
        }
    }
}

/// Parses an optional foreign key (`idCategoria`, `idProveedor`).
///
/// `null`, `0` and `""` all mean "no reference".
pub fn optional_reference(field: &str, value: &Value) -> ValidationResult<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        value => {
            let n = strict_number(value)
                .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= i64::MAX as f64)
                .ok_or_else(|| {
                    ValidationError::invalid_format(field, "must be a non-negative integer")
                })?;

            Ok(if n == 0.0 { None } else { Some(n as i64) })
        }
    }
}

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces a JSON value to a number with browser `Number()` semantics.
///
/// Returns `None` when the value is not numeric (callers fall back to 0).
///
/// ## Example
/// ```rust
/// use botica_core::validation::coerce_number;
/// use serde_json::json;
///
/// assert_eq!(coerce_number(&json!("12")), Some(12.0));
/// assert_eq!(coerce_number(&json!(true)), Some(1.0));
/// assert_eq!(coerce_number(&json!(null)), Some(0.0));
/// assert_eq!(coerce_number(&json!("abc")), None);
/// ```
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        other => strict_number(other),
    }
}

/// Numbers and numeric strings only. Rejects NaN and infinities.
fn strict_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    n.is_finite().then_some(n)
}

/// Lenient stock quantity: coerced, rounded to a whole unit, 0 on garbage.
pub fn lenient_stock(value: Option<&Value>) -> i64 {
    value
        .and_then(coerce_number)
        .map(|n| n.round() as i64)
        .unwrap_or(0)
}

/// Lenient stock threshold (minimum / maximum). Must not be negative.
pub fn stock_threshold(field: &str, value: Option<&Value>) -> ValidationResult<i64> {
    let n = lenient_stock(value);
    if n < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(n)
}

/// Optional maximum stock: absent or `null` stays `None`.
pub fn optional_stock_threshold(
    field: &str,
    value: Option<&Value>,
) -> ValidationResult<Option<i64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => stock_threshold(field, Some(v)).map(Some),
    }
}

/// Lenient product price in major units. Must not be negative.
///
/// ## Example
/// ```rust
/// use botica_core::validation::lenient_price;
/// use serde_json::json;
///
/// assert_eq!(lenient_price("precioVenta", Some(&json!("10.5"))).unwrap().cents(), 1050);
/// assert_eq!(lenient_price("precioVenta", None).unwrap().cents(), 0);
/// assert!(lenient_price("precioVenta", Some(&json!(-1))).is_err());
/// ```
pub fn lenient_price(field: &str, value: Option<&Value>) -> ValidationResult<Money> {
    let amount = value.and_then(coerce_number).unwrap_or(0.0);
    let price = Money::from_major(amount)
        .ok_or_else(|| ValidationError::amount_out_of_range(field))?;

    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(price)
}

/// Quotation line unit price: optional, numeric, `>= 0`.
pub fn optional_unit_price(field: &str, value: Option<&Value>) -> ValidationResult<Option<Money>> {
    let value = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };

    let amount =
        strict_number(value).ok_or_else(|| ValidationError::invalid_format(field, "must be a number"))?;
    let price = Money::from_major(amount)
        .ok_or_else(|| ValidationError::amount_out_of_range(field))?;

    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(Some(price))
}

/// Validates a quotation quantity.
///
/// ## Rules
/// - Must be present and numeric (fractions allowed: 2.5 liters)
/// - Must be finite and greater than zero
pub fn validate_quantity(field: &str, value: Option<&Value>) -> ValidationResult<f64> {
    let value = match value {
        None | Some(Value::Null) => return Err(ValidationError::required(field)),
        Some(v) => v,
    };

    let qty =
        strict_number(value).ok_or_else(|| ValidationError::invalid_format(field, "must be a number"))?;

    if qty <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(qty)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name, returning it trimmed.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_product_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Reads a text field leniently.
///
/// Strings pass through untouched; numbers and booleans take their JSON
/// spelling, so a barcode sent as `7501` is stored as `"7501"`. Absent or
/// `null` is `None`. Arrays and objects are rejected.
///
/// ```rust
/// use botica_core::validation::coerce_text;
/// use serde_json::json;
///
/// assert_eq!(coerce_text("codigo", Some(&json!(7501))).unwrap(), Some("7501".to_string()));
/// assert_eq!(coerce_text("codigo", Some(&json!(null))).unwrap(), None);
/// assert!(coerce_text("codigo", Some(&json!(["7501"]))).is_err());
/// ```
pub fn coerce_text(field: &str, value: Option<&Value>) -> ValidationResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(ValidationError::invalid_format(field, "must be text")),
    }
}

/// Trims optional free text; blank becomes `None`.
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Normalizes a search term: trimmed, and required after trimming.
pub fn normalize_search_term(raw: Option<&str>) -> ValidationResult<String> {
    let term = raw.map(str::trim).unwrap_or_default();

    if term.is_empty() {
        return Err(ValidationError::required("q"));
    }

    Ok(term.to_string())
}

/// Parses an optional `YYYY-MM-DD` date. Blank means `None`.
///
/// ## Example
/// ```rust
/// use botica_core::validation::parse_expiration_date;
///
/// assert!(parse_expiration_date("fechaVencimiento", "2026-03-31").unwrap().is_some());
/// assert!(parse_expiration_date("fechaVencimiento", "").unwrap().is_none());
/// assert!(parse_expiration_date("fechaVencimiento", "31/03/2026").is_err());
/// ```
pub fn parse_expiration_date(field: &str, raw: &str) -> ValidationResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::invalid_format(field, "expected YYYY-MM-DD"))
}

/// Parses a product status keyword. Blank means the default (`ACTIVE`).
pub fn parse_status(field: &str, raw: &str) -> ValidationResult<ProductStatus> {
    if raw.trim().is_empty() {
        return Ok(ProductStatus::default());
    }

    ProductStatus::parse(raw).ok_or_else(|| ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: vec![
            ProductStatus::Active.as_str().to_string(),
            ProductStatus::Inactive.as_str().to_string(),
        ],
    })
}

// =============================================================================
// Collection Validators
// =============================================================================

/// A quotation needs at least one line.
pub fn validate_item_count(field: &str, count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::required(field));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
