//! Product list view state.
//!
//! [`CatalogViewState`] is the single source of truth for what the list screen
//! shows. Inputs (collection, search term, page size, page index) change
//! independently; the filtered and paginated views are pure functions of the
//! current inputs and are recomputed on every read, so there is nothing to
//! invalidate.
//!
//! The stored page index is clamped lazily when producing the visible slice.
//! Operations that can strand it (new search, new page size, delete) reset or
//! clamp it eagerly as well.

use pagination::{PageSize, PageSummary, PageWindow};
use tracing::debug;

use crate::domain::ports::CatalogGatewayError;
use crate::domain::{Product, ProductId};

const LOAD_FAILED_MESSAGE: &str = "failed to load products";
const DELETE_FAILED_MESSAGE: &str = "failed to delete product";

/// Delete confirmation sub-state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteConfirmation {
    product: Option<Product>,
    modal_open: bool,
    in_flight: bool,
}

impl DeleteConfirmation {
    /// Product staged for deletion.
    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// Whether the confirmation modal is visible.
    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// Whether a delete call is outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    fn close(&mut self) {
        self.product = None;
        self.modal_open = false;
        self.in_flight = false;
    }
}

/// Render-ready copy of the visible page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// Rows on the visible page.
    pub rows: Vec<Product>,
    /// Page counters.
    pub summary: PageSummary,
    /// Raw search term as typed.
    pub search_term: String,
    /// Whether a load is outstanding.
    pub loading: bool,
    /// Message from the last failed operation.
    pub error: Option<String>,
    /// Row whose action menu is open.
    pub open_menu_id: Option<ProductId>,
    /// Delete confirmation state.
    pub delete: DeleteConfirmation,
}

/// State owned by one product list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogViewState {
    products: Option<Vec<Product>>,
    loading: bool,
    error: Option<String>,
    search_term: String,
    page_size: PageSize,
    page_index: usize,
    open_menu_id: Option<ProductId>,
    delete: DeleteConfirmation,
}

impl Default for CatalogViewState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl CatalogViewState {
    /// Fresh state for a screen entry; nothing loaded yet.
    pub fn new(page_size: PageSize) -> Self {
        Self {
            products: None,
            loading: false,
            error: None,
            search_term: String::new(),
            page_size,
            page_index: 0,
            open_menu_id: None,
            delete: DeleteConfirmation::default(),
        }
    }

    /// Last loaded collection, if any load has succeeded.
    pub fn products(&self) -> Option<&[Product]> {
        self.products.as_deref()
    }

    /// Whether a load is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed operation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Raw search term as typed.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Rows per page.
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Stored 0-based page index; may exceed the last page until read.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Row whose action menu is open.
    pub fn open_menu_id(&self) -> Option<&ProductId> {
        self.open_menu_id.as_ref()
    }

    /// Delete confirmation sub-state.
    pub fn delete_confirmation(&self) -> &DeleteConfirmation {
        &self.delete
    }

    /// Look up a loaded product by identifier.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products()?.iter().find(|product| &product.id == id)
    }

    /// Products whose name or description contains the search term,
    /// ignoring case and surrounding whitespace.
    pub fn filtered(&self) -> Vec<&Product> {
        let needle = self.search_term.trim().to_lowercase();
        self.products()
            .unwrap_or_default()
            .iter()
            .filter(|product| product.matches_search(&needle))
            .collect()
    }

    /// Number of products matching the search term.
    pub fn total_results(&self) -> usize {
        self.filtered().len()
    }

    /// Page arithmetic over the filtered set.
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.total_results(), self.page_size)
    }

    /// Number of pages of filtered results; zero when nothing matches.
    pub fn total_pages(&self) -> usize {
        self.window().total_pages()
    }

    /// Page index actually rendered, clamped to the filtered set.
    pub fn effective_page_index(&self) -> usize {
        self.window().effective_index(self.page_index)
    }

    /// 1-based page number for display; zero when nothing matches.
    pub fn current_page(&self) -> usize {
        self.window().current_page(self.page_index)
    }

    /// Products on the visible page.
    pub fn paginated(&self) -> Vec<&Product> {
        let filtered = self.filtered();
        let window = PageWindow::new(filtered.len(), self.page_size);
        window.slice(&filtered, self.page_index).to_vec()
    }

    /// Copy the visible page for rendering.
    pub fn snapshot(&self) -> CatalogPage {
        CatalogPage {
            rows: self.paginated().into_iter().cloned().collect(),
            summary: self.window().summary(self.page_index),
            search_term: self.search_term.clone(),
            loading: self.loading,
            error: self.error.clone(),
            open_menu_id: self.open_menu_id.clone(),
            delete: self.delete.clone(),
        }
    }

    /// Replace the search term; a new search always starts on the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page_index = 0;
    }

    /// Replace the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page_index = 0;
    }

    /// Advance one page; a no-op on the last page.
    pub fn next_page(&mut self) {
        let window = self.window();
        if window.has_next(self.page_index) {
            self.page_index = window.effective_index(self.page_index).saturating_add(1);
        }
    }

    /// Go back one page; a no-op on the first page.
    pub fn prev_page(&mut self) {
        let window = self.window();
        if window.has_previous(self.page_index) {
            self.page_index = window.effective_index(self.page_index).saturating_sub(1);
        }
    }

    /// Open the menu for `id`, or close it if it is already open.
    pub fn toggle_menu(&mut self, id: &ProductId) {
        if self.open_menu_id.as_ref() == Some(id) {
            self.open_menu_id = None;
        } else {
            self.open_menu_id = Some(id.clone());
        }
    }

    /// Close any open row menu.
    pub fn close_menu(&mut self) {
        self.open_menu_id = None;
    }

    /// Stage `product` for deletion and show the confirmation modal.
    pub fn request_delete(&mut self, product: Product) {
        self.close_menu();
        self.delete = DeleteConfirmation {
            product: Some(product),
            modal_open: true,
            in_flight: false,
        };
    }

    /// Abort a staged delete.
    pub fn cancel_delete(&mut self) {
        self.delete.close();
    }

    /// Mark a load as started.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Install a freshly loaded collection and return to the first page.
    pub fn apply_loaded(&mut self, products: Vec<Product>) {
        self.products = Some(products);
        self.page_index = 0;
        self.loading = false;
        self.error = None;
    }

    /// Record a failed load, keeping the last known collection.
    pub fn apply_load_failure(&mut self, error: &CatalogGatewayError) {
        self.error = Some(message_or(error, LOAD_FAILED_MESSAGE));
        self.loading = false;
    }

    /// Mark the staged delete as in flight and return its identifier.
    ///
    /// Returns `None` when nothing is staged or a delete is already running.
    pub fn begin_delete(&mut self) -> Option<ProductId> {
        if self.delete.in_flight {
            return None;
        }
        let id = self.delete.product.as_ref()?.id.clone();
        self.delete.in_flight = true;
        Some(id)
    }

    /// Remove a deleted product and keep the page index in range.
    pub fn apply_deleted(&mut self, id: &ProductId) {
        if let Some(products) = self.products.as_mut() {
            products.retain(|product| &product.id != id);
        }
        if self.open_menu_id.as_ref() == Some(id) {
            self.open_menu_id = None;
        }
        self.delete.close();

        let clamped = self.effective_page_index();
        if clamped != self.page_index {
            debug!(
                from = self.page_index,
                to = clamped,
                "page index clamped after delete"
            );
            self.page_index = clamped;
        }
    }

    /// Record a failed delete; the collection is left untouched.
    pub fn apply_delete_failure(&mut self, error: &CatalogGatewayError) {
        self.error = Some(message_or(error, DELETE_FAILED_MESSAGE));
        self.delete.close();
    }
}

fn message_or(error: &CatalogGatewayError, fallback: &str) -> String {
    let message = error.message().trim();
    if message.is_empty() {
        fallback.to_owned()
    } else {
        message.to_owned()
    }
}

#[cfg(test)]
#[path = "catalog_view_tests.rs"]
mod tests;
