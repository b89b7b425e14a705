//! Offset pagination primitives shared by the catalog list views.
//!
//! The crate keeps the arithmetic of "which slice of a filtered collection is
//! visible" in one place so views never index past the end of their data.
//!
//! - [`PageSize`] is a validated, non-zero number of rows per page.
//! - [`PageWindow`] derives total pages, the effective (clamped) page index,
//!   the 1-based current page, and the slice range for a requested index.
//! - [`PageSummary`] is the serialisable envelope describing one rendered page.
//!
//! # Example
//!
//! ```
//! use pagination::{PageSize, PageWindow};
//!
//! let size = PageSize::new(2).expect("non-zero page size");
//! let window = PageWindow::new(3, size);
//!
//! assert_eq!(window.total_pages(), 2);
//! assert_eq!(window.range(1), 2..3);
//! // Requests past the end are clamped to the last page.
//! assert_eq!(window.effective_index(7), 1);
//! ```

mod page_size;
mod window;

pub use page_size::{PageSize, PageSizeError};
pub use window::{PageSummary, PageWindow};
