//! Financial product data model.
//!
//! The server owns the catalog; the client holds transient copies of these
//! records. Identifiers are supplied by the client at creation time and are
//! immutable afterwards.

use std::fmt;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Minimum identifier length accepted by the form rules.
pub const PRODUCT_ID_MIN: usize = 3;
/// Maximum identifier length accepted by the form rules.
pub const PRODUCT_ID_MAX: usize = 10;
/// Minimum product name length.
pub const PRODUCT_NAME_MIN: usize = 5;
/// Maximum product name length.
pub const PRODUCT_NAME_MAX: usize = 100;
/// Minimum product description length.
pub const PRODUCT_DESCRIPTION_MIN: usize = 10;
/// Maximum product description length.
pub const PRODUCT_DESCRIPTION_MAX: usize = 200;

/// Client-supplied product identifier.
///
/// Values read from the server are taken as-is; length bounds are enforced by
/// the form rules before anything new reaches the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One financial product in the catalog.
///
/// ## Invariants
/// - `date_revision` is exactly one calendar year after `date_release` for
///   every record the client builds (see [`revision_date_for`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Logo URL.
    pub logo: String,
    /// Date the product becomes available.
    pub date_release: NaiveDate,
    /// Date the product is due for review.
    pub date_revision: NaiveDate,
}

impl Product {
    /// Whether the product name or description contains `needle`.
    ///
    /// `needle` must already be lower-cased and trimmed; an empty needle
    /// matches every product.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Partial update payload for an existing product.
///
/// Absent fields are left untouched by the server. The identifier itself is
/// never part of a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductPatch {
    /// Replacement name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement logo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Replacement release date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_release: Option<NaiveDate>,
    /// Replacement revision date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_revision: Option<NaiveDate>,
}

impl From<&Product> for ProductPatch {
    fn from(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            description: Some(product.description.clone()),
            logo: Some(product.logo.clone()),
            date_release: Some(product.date_release),
            date_revision: Some(product.date_revision),
        }
    }
}

/// Revision date for a product released on `release`: same month and day,
/// one year later.
///
/// February 29th maps to February 28th of the following year. Returns `None`
/// only when the result would overflow the supported calendar.
///
/// # Examples
/// ```
/// use catalog_client::domain::revision_date_for;
/// use chrono::NaiveDate;
///
/// let release = NaiveDate::from_ymd_opt(2026, 11, 16).expect("valid date");
/// assert_eq!(revision_date_for(release), NaiveDate::from_ymd_opt(2027, 11, 16));
/// ```
pub fn revision_date_for(release: NaiveDate) -> Option<NaiveDate> {
    release.checked_add_months(Months::new(12))
}
