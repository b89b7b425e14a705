//! Product list engine.
//!
//! Couples [`CatalogViewState`] with the catalog gateway. Intents that only
//! touch local state are synchronous; `load` and `confirm_delete` await the
//! gateway and fold the result back into the state. Both take `&mut self`, so
//! at most one load and one delete are outstanding per screen.

use std::sync::Arc;

use pagination::PageSize;
use tracing::{info, warn};

use crate::domain::ports::CatalogGateway;
use crate::domain::{CatalogPage, CatalogViewState, Product, ProductId};

/// List screen engine owning one [`CatalogViewState`].
pub struct CatalogEngine<G> {
    gateway: Arc<G>,
    state: CatalogViewState,
}

impl<G> CatalogEngine<G> {
    /// Create an engine with the default page size.
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_page_size(gateway, PageSize::default())
    }

    /// Create an engine with an explicit page size.
    pub fn with_page_size(gateway: Arc<G>, page_size: PageSize) -> Self {
        Self {
            gateway,
            state: CatalogViewState::new(page_size),
        }
    }

    /// Current view state.
    pub fn state(&self) -> &CatalogViewState {
        &self.state
    }

    /// Copy the visible page for rendering.
    pub fn snapshot(&self) -> CatalogPage {
        self.state.snapshot()
    }

    /// See [`CatalogViewState::set_search_term`].
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.set_search_term(term);
    }

    /// See [`CatalogViewState::set_page_size`].
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.state.set_page_size(page_size);
    }

    /// See [`CatalogViewState::next_page`].
    pub fn next_page(&mut self) {
        self.state.next_page();
    }

    /// See [`CatalogViewState::prev_page`].
    pub fn prev_page(&mut self) {
        self.state.prev_page();
    }

    /// See [`CatalogViewState::toggle_menu`].
    pub fn toggle_menu(&mut self, id: &ProductId) {
        self.state.toggle_menu(id);
    }

    /// See [`CatalogViewState::close_menu`].
    pub fn close_menu(&mut self) {
        self.state.close_menu();
    }

    /// See [`CatalogViewState::request_delete`].
    pub fn request_delete(&mut self, product: Product) {
        self.state.request_delete(product);
    }

    /// See [`CatalogViewState::cancel_delete`].
    pub fn cancel_delete(&mut self) {
        self.state.cancel_delete();
    }
}

impl<G> CatalogEngine<G>
where
    G: CatalogGateway,
{
    /// Fetch the full catalog.
    ///
    /// Failures are recorded on the state for display; the previous
    /// collection, if any, stays in place.
    pub async fn load(&mut self) {
        self.state.begin_load();
        match self.gateway.list_products().await {
            Ok(products) => {
                info!(count = products.len(), "catalog loaded");
                self.state.apply_loaded(products);
            }
            Err(error) => {
                warn!(error = %error, status = ?error.status(), "catalog load failed");
                self.state.apply_load_failure(&error);
            }
        }
    }

    /// Execute the staged delete.
    ///
    /// A no-op when nothing is staged or a delete is already running.
    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.state.begin_delete() else {
            return;
        };
        match self.gateway.delete_product(&id).await {
            Ok(ack) => {
                info!(product_id = %id, message = %ack.message, "product deleted");
                self.state.apply_deleted(&id);
            }
            Err(error) => {
                warn!(product_id = %id, error = %error, "product delete failed");
                self.state.apply_delete_failure(&error);
            }
        }
    }
}
