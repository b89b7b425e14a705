//! Validated page size.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`PageSize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// A page must hold at least one row.
    #[error("page size must be greater than zero")]
    Zero,
    /// The raw text was not an unsigned integer.
    #[error("page size must be a positive integer, got '{raw}'")]
    NotANumber {
        /// Input that failed to parse.
        raw: String,
    },
}

/// Number of rows shown on one page.
///
/// ## Invariants
/// - Always greater than zero, so page counts never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Page size used when a view does not choose one.
    pub const DEFAULT: Self = Self(NonZeroUsize::MIN.saturating_add(4));

    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::Zero`] when `size` is zero.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageSize, PageSizeError};
    ///
    /// assert_eq!(PageSize::new(10).map(PageSize::get), Ok(10));
    /// assert_eq!(PageSize::new(0), Err(PageSizeError::Zero));
    /// ```
    pub fn new(size: usize) -> Result<Self, PageSizeError> {
        NonZeroUsize::new(size).map(Self).ok_or(PageSizeError::Zero)
    }

    /// Rows per page.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<NonZeroUsize> for PageSize {
    fn from(value: NonZeroUsize) -> Self {
        Self(value)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

impl FromStr for PageSize {
    type Err = PageSizeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parsed = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| PageSizeError::NotANumber {
                raw: raw.to_owned(),
            })?;
        Self::new(parsed)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(test)]
mod tests {
    //! Covers page size validation and parsing.

    use rstest::rstest;

    use super::*;

    #[test]
    fn default_page_size_is_five() {
        assert_eq!(PageSize::default().get(), 5);
    }

    #[rstest]
    #[case("5", Ok(5))]
    #[case(" 20 ", Ok(20))]
    #[case("0", Err(PageSizeError::Zero))]
    #[case("-3", Err(PageSizeError::NotANumber { raw: "-3".to_owned() }))]
    #[case("ten", Err(PageSizeError::NotANumber { raw: "ten".to_owned() }))]
    fn parses_page_size_text(#[case] raw: &str, #[case] expected: Result<usize, PageSizeError>) {
        assert_eq!(raw.parse::<PageSize>().map(PageSize::get), expected);
    }

    #[test]
    fn deserialising_zero_is_rejected() {
        let result = serde_json::from_str::<PageSize>("0");
        assert!(result.is_err(), "zero must not deserialise into a page size");
    }
}
