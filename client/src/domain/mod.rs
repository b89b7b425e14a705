//! Domain model and services for the product catalog client.
//!
//! Purpose: hold the catalog data model, the list screen state, and the form
//! session independently of any transport. Adapters reach the outside world
//! through [`ports::CatalogGateway`].
//!
//! Public surface:
//! - Product, ProductId, ProductPatch: catalog records and update payloads.
//! - CatalogViewState, CatalogEngine: product list state and its driver.
//! - UniquenessChecker: debounced identifier verification.
//! - FieldReport, ProductField: form field rules.
//! - ProductForm: create and edit form session.

pub mod catalog_engine;
pub mod catalog_view;
pub mod field_rules;
pub mod ports;
pub mod product;
pub mod product_form;
pub mod uniqueness;

pub use self::catalog_engine::CatalogEngine;
pub use self::catalog_view::{CatalogPage, CatalogViewState, DeleteConfirmation};
pub use self::field_rules::{DATE_FORMAT, FieldError, FieldReport, ProductField, Rule, parse_date};
pub use self::product::{
    PRODUCT_DESCRIPTION_MAX, PRODUCT_DESCRIPTION_MIN, PRODUCT_ID_MAX, PRODUCT_ID_MIN,
    PRODUCT_NAME_MAX, PRODUCT_NAME_MIN, Product, ProductId, ProductPatch, revision_date_for,
};
pub use self::product_form::{FormLoadError, FormMode, ProductForm, SubmitError};
pub use self::uniqueness::{
    CheckOutcome, CheckTicket, DEFAULT_DEBOUNCE, IdConflict, UniquenessChecker,
};
