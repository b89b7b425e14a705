//! Create and edit form session for one product.
//!
//! The form keeps the raw text of each field, evaluates the field rules on
//! demand, and owns the identifier's uniqueness checker. The revision date is
//! never typed by the user; it follows the release date.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::field_rules::{DATE_FORMAT, FieldError, FieldReport, ProductField, parse_date};
use crate::domain::ports::{CatalogGateway, CatalogGatewayError, ProductMutation};
use crate::domain::uniqueness::{CheckOutcome, IdConflict, UniquenessChecker};
use crate::domain::{Product, ProductId, ProductPatch, revision_date_for};

/// Whether the form creates a new product or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// New product with a client-chosen identifier.
    Create,
    /// Existing product; the identifier is locked.
    Edit {
        /// Product as loaded, used by [`ProductForm::reset`].
        original: Product,
    },
}

/// Errors returned by [`ProductForm::load_for_edit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormLoadError {
    /// No product has the requested identifier.
    #[error("product not found")]
    NotFound {
        /// Identifier that was looked up.
        id: ProductId,
    },
    /// The catalog could not be read.
    #[error(transparent)]
    Gateway(#[from] CatalogGatewayError),
}

/// Reasons a submission did not reach the server or was rejected by it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// At least one field fails its rules.
    #[error("form has invalid fields")]
    Invalid {
        /// Fields with failing rules, in display order.
        fields: Vec<ProductField>,
    },
    /// The identifier check has not resolved yet.
    #[error("identifier check still pending")]
    Pending,
    /// The server rejected the request or could not be reached.
    #[error(transparent)]
    Gateway(#[from] CatalogGatewayError),
}

const SAVE_FAILED_MESSAGE: &str = "failed to save product";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct IdCheck {
    pending: bool,
    conflict: Option<IdConflict>,
}

/// Form session for creating or editing a product.
pub struct ProductForm<G> {
    checker: UniquenessChecker<G>,
    clock: Arc<dyn Clock>,
    mode: FormMode,
    id: String,
    name: String,
    description: String,
    logo: String,
    date_release: String,
    date_revision: Option<NaiveDate>,
    id_check: IdCheck,
    submitting: bool,
    error: Option<String>,
}

impl<G> ProductForm<G> {
    /// Empty form for a new product; the release date defaults to today.
    pub fn create(checker: UniquenessChecker<G>, clock: Arc<dyn Clock>) -> Self {
        let mut form = Self {
            checker,
            clock,
            mode: FormMode::Create,
            id: String::new(),
            name: String::new(),
            description: String::new(),
            logo: String::new(),
            date_release: String::new(),
            date_revision: None,
            id_check: IdCheck::default(),
            submitting: false,
            error: None,
        };
        form.reset();
        form
    }

    /// Form pre-filled with `product`.
    pub fn edit(product: Product, checker: UniquenessChecker<G>, clock: Arc<dyn Clock>) -> Self {
        let mut form = Self::create(checker, clock);
        form.mode = FormMode::Edit { original: product };
        form.reset();
        form
    }

    /// Current mode.
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Whether the form edits an existing product.
    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    /// Today's date in the local calendar.
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    /// Raw identifier text.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw name text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw description text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Raw logo URL text.
    pub fn logo(&self) -> &str {
        &self.logo
    }

    /// Raw release date text.
    pub fn date_release(&self) -> &str {
        &self.date_release
    }

    /// Revision date derived from the release date.
    pub fn date_revision(&self) -> Option<NaiveDate> {
        self.date_revision
    }

    /// Whether a submission is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Message from the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the identifier check has not resolved yet.
    pub fn is_id_check_pending(&self) -> bool {
        self.id_check.pending
    }

    /// Replace the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replace the logo URL.
    pub fn set_logo(&mut self, logo: impl Into<String>) {
        self.logo = logo.into();
    }

    /// Replace the release date and recompute the revision date.
    ///
    /// Text that is not a `YYYY-MM-DD` date clears the revision date.
    pub fn set_date_release(&mut self, raw: impl Into<String>) {
        self.date_release = raw.into();
        self.date_revision = parse_date(&self.date_release).and_then(revision_date_for);
    }

    /// Apply a finished identifier check.
    ///
    /// Returns `false` and leaves the form untouched when the outcome was
    /// superseded or a newer check has started since.
    pub fn apply_id_check(&mut self, outcome: CheckOutcome) -> bool {
        match outcome {
            CheckOutcome::Resolved { ticket, conflict } if self.checker.is_latest(ticket) => {
                self.id_check = IdCheck {
                    pending: false,
                    conflict,
                };
                true
            }
            CheckOutcome::Resolved { .. } | CheckOutcome::Superseded { .. } => false,
        }
    }

    /// Value of `field` as the rules see it.
    pub fn value(&self, field: ProductField) -> String {
        match field {
            ProductField::Id => self.id.clone(),
            ProductField::Name => self.name.clone(),
            ProductField::Description => self.description.clone(),
            ProductField::Logo => self.logo.clone(),
            ProductField::DateRelease => self.date_release.clone(),
            ProductField::DateRevision => self
                .date_revision
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// Failing rules for `field`, highest priority first.
    pub fn report(&self, field: ProductField) -> FieldReport {
        let mut report = FieldReport::evaluate(field.rules(), &self.value(field), self.today());
        if field.is_unique_checked() && self.id_check.conflict.is_some() {
            report.push(FieldError::Taken);
        }
        report
    }

    /// Fields with at least one failing rule, in display order.
    pub fn invalid_fields(&self) -> Vec<ProductField> {
        ProductField::ALL
            .into_iter()
            .filter(|field| !self.report(*field).is_valid())
            .collect()
    }

    /// Whether every field passes its rules.
    pub fn is_valid(&self) -> bool {
        self.invalid_fields().is_empty()
    }

    /// Restore the initial values.
    ///
    /// A create form is cleared with the release date back to today; an edit
    /// form returns to the loaded product. Identifier checks still in flight
    /// are superseded.
    pub fn reset(&mut self) {
        self.checker.supersede();
        self.id_check = IdCheck::default();
        self.error = None;
        match &self.mode {
            FormMode::Create => {
                self.id.clear();
                self.name.clear();
                self.description.clear();
                self.logo.clear();
                let today = self.today().format(DATE_FORMAT).to_string();
                self.set_date_release(today);
            }
            FormMode::Edit { original } => {
                self.id = original.id.to_string();
                self.name.clone_from(&original.name);
                self.description.clone_from(&original.description);
                self.logo.clone_from(&original.logo);
                self.date_release = original.date_release.format(DATE_FORMAT).to_string();
                self.date_revision = Some(original.date_revision);
            }
        }
    }

    fn product(&self) -> Option<Product> {
        Some(Product {
            id: ProductId::new(self.id.clone()),
            name: self.name.clone(),
            description: self.description.clone(),
            logo: self.logo.clone(),
            date_release: parse_date(&self.date_release)?,
            date_revision: self.date_revision?,
        })
    }
}

impl<G> ProductForm<G>
where
    G: CatalogGateway + 'static,
{
    /// Fetch `id` and open an edit form for it.
    ///
    /// # Errors
    /// [`FormLoadError::NotFound`] when the catalog has no such product;
    /// [`FormLoadError::Gateway`] when the catalog cannot be read.
    pub async fn load_for_edit(
        gateway: &G,
        id: &ProductId,
        checker: UniquenessChecker<G>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, FormLoadError> {
        let product = gateway
            .get_product(id)
            .await?
            .ok_or_else(|| FormLoadError::NotFound { id: id.clone() })?;
        Ok(Self::edit(product, checker, clock))
    }

    /// Replace the identifier and start its uniqueness check.
    ///
    /// Feed the returned outcome to [`ProductForm::apply_id_check`]. In edit
    /// mode the identifier is locked: the text is left as loaded and the
    /// check resolves at once.
    pub fn set_id<S>(&mut self, raw: S) -> impl Future<Output = CheckOutcome> + Send + use<G, S>
    where
        S: Into<String>,
    {
        let current = match &self.mode {
            FormMode::Create => {
                self.id = raw.into();
                None
            }
            FormMode::Edit { original } => Some(original.id.clone()),
        };
        self.id_check = IdCheck {
            pending: true,
            conflict: None,
        };
        self.checker.check(&self.id, current.as_ref())
    }

    /// Send the form to the server.
    ///
    /// # Errors
    /// [`SubmitError::Pending`] while the identifier check runs,
    /// [`SubmitError::Invalid`] when any rule fails, and
    /// [`SubmitError::Gateway`] when the server rejects the request. Gateway
    /// messages are also kept for display via [`ProductForm::error`].
    pub async fn submit(&mut self, gateway: &G) -> Result<ProductMutation, SubmitError> {
        if self.id_check.pending {
            return Err(SubmitError::Pending);
        }
        let fields = self.invalid_fields();
        if !fields.is_empty() {
            return Err(SubmitError::Invalid { fields });
        }
        let Some(product) = self.product() else {
            return Err(SubmitError::Invalid {
                fields: vec![ProductField::DateRelease],
            });
        };

        self.submitting = true;
        self.error = None;
        let result = match &self.mode {
            FormMode::Create => gateway.create_product(&product).await,
            FormMode::Edit { .. } => {
                gateway
                    .update_product(&product.id, &ProductPatch::from(&product))
                    .await
            }
        };
        self.submitting = false;

        match result {
            Ok(mutation) => {
                info!(
                    product_id = %product.id,
                    edit = self.is_edit(),
                    message = %mutation.message,
                    "product saved"
                );
                Ok(mutation)
            }
            Err(error) => {
                warn!(product_id = %product.id, error = %error, "product save failed");
                let message = error.message().trim();
                self.error = Some(if message.is_empty() {
                    SAVE_FAILED_MESSAGE.to_owned()
                } else {
                    message.to_owned()
                });
                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "product_form_tests.rs"]
mod tests;
