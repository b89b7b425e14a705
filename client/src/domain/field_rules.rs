//! Field validity rules for the product form.
//!
//! Rules are pure predicates over the raw text of one field. A field's report
//! lists every failing rule ordered by priority (required, then length, then
//! date, then uniqueness); the first entry supplies the user-facing message.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{
    PRODUCT_DESCRIPTION_MAX, PRODUCT_DESCRIPTION_MIN, PRODUCT_ID_MAX, PRODUCT_ID_MIN,
    PRODUCT_NAME_MAX, PRODUCT_NAME_MIN,
};

/// Wire and input format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Editable fields of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    /// Product identifier.
    Id,
    /// Display name.
    Name,
    /// Free-text description.
    Description,
    /// Logo URL.
    Logo,
    /// Release date.
    DateRelease,
    /// Derived revision date.
    DateRevision,
}

impl ProductField {
    /// Every field, in display order.
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Name,
        Self::Description,
        Self::Logo,
        Self::DateRelease,
        Self::DateRevision,
    ];

    /// Synchronous rules attached to the field.
    pub fn rules(self) -> &'static [Rule] {
        match self {
            Self::Id => &ID_RULES,
            Self::Name => &NAME_RULES,
            Self::Description => &DESCRIPTION_RULES,
            Self::Logo | Self::DateRevision => &REQUIRED_ONLY,
            Self::DateRelease => &RELEASE_RULES,
        }
    }

    /// Whether the asynchronous uniqueness rule applies.
    pub fn is_unique_checked(self) -> bool {
        matches!(self, Self::Id)
    }
}

const ID_RULES: [Rule; 3] = [
    Rule::Required,
    Rule::MinLength(PRODUCT_ID_MIN),
    Rule::MaxLength(PRODUCT_ID_MAX),
];
const NAME_RULES: [Rule; 3] = [
    Rule::Required,
    Rule::MinLength(PRODUCT_NAME_MIN),
    Rule::MaxLength(PRODUCT_NAME_MAX),
];
const DESCRIPTION_RULES: [Rule; 3] = [
    Rule::Required,
    Rule::MinLength(PRODUCT_DESCRIPTION_MIN),
    Rule::MaxLength(PRODUCT_DESCRIPTION_MAX),
];
const RELEASE_RULES: [Rule; 2] = [Rule::Required, Rule::NotBeforeToday];
const REQUIRED_ONLY: [Rule; 1] = [Rule::Required];

/// One synchronous rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must not be empty.
    Required,
    /// Value must have at least this many characters.
    MinLength(usize),
    /// Value must have at most this many characters.
    MaxLength(usize),
    /// Value must parse as a date on or after today.
    NotBeforeToday,
}

impl Rule {
    /// Evaluate the rule against `value`.
    ///
    /// Only [`Rule::Required`] rejects an empty value; the other rules pass
    /// it so a blank field reports a single failure.
    pub fn check(self, value: &str, today: NaiveDate) -> Result<(), FieldError> {
        if value.is_empty() {
            return match self {
                Self::Required => Err(FieldError::Required),
                Self::MinLength(_) | Self::MaxLength(_) | Self::NotBeforeToday => Ok(()),
            };
        }
        match self {
            Self::Required => Ok(()),
            Self::MinLength(min) if value.chars().count() < min => {
                Err(FieldError::TooShort { min })
            }
            Self::MaxLength(max) if value.chars().count() > max => {
                Err(FieldError::TooLong { max })
            }
            Self::MinLength(_) | Self::MaxLength(_) => Ok(()),
            Self::NotBeforeToday => match parse_date(value) {
                None => Err(FieldError::InvalidDate),
                Some(date) if date < today => Err(FieldError::DateInPast),
                Some(_) => Ok(()),
            },
        }
    }
}

/// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// A failing field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field is empty.
    #[error("This field is required!")]
    Required,
    /// The value is shorter than allowed.
    #[error("Minimum {min} characters")]
    TooShort {
        /// Lower bound in characters.
        min: usize,
    },
    /// The value is longer than allowed.
    #[error("Maximum {max} characters")]
    TooLong {
        /// Upper bound in characters.
        max: usize,
    },
    /// The value is not a `YYYY-MM-DD` date.
    #[error("Enter a valid date (YYYY-MM-DD)")]
    InvalidDate,
    /// The date lies before today.
    #[error("Date must be today or later")]
    DateInPast,
    /// The identifier belongs to another product.
    #[error("ID not valid!")]
    Taken,
}

impl FieldError {
    /// Position in the message priority order; lower wins.
    pub const fn priority(self) -> u8 {
        match self {
            Self::Required => 0,
            Self::TooShort { .. } | Self::TooLong { .. } => 1,
            Self::InvalidDate | Self::DateInPast => 2,
            Self::Taken => 3,
        }
    }
}

/// Failing rules for one field, highest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldReport {
    errors: Vec<FieldError>,
}

impl FieldReport {
    /// Evaluate `rules` against `value`.
    pub fn evaluate(rules: &[Rule], value: &str, today: NaiveDate) -> Self {
        Self::from_errors(
            rules
                .iter()
                .filter_map(|rule| rule.check(value, today).err()),
        )
    }

    /// Build a report from failures in any order.
    pub fn from_errors(errors: impl IntoIterator<Item = FieldError>) -> Self {
        let mut errors: Vec<FieldError> = errors.into_iter().collect();
        errors.sort_by_key(|error| error.priority());
        Self { errors }
    }

    /// Add a failure, keeping priority order.
    pub fn push(&mut self, error: FieldError) {
        let at = self
            .errors
            .partition_point(|existing| existing.priority() <= error.priority());
        self.errors.insert(at, error);
    }

    /// Whether every rule passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failing rules, highest priority first.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Highest-priority failure.
    pub fn first(&self) -> Option<FieldError> {
        self.errors.first().copied()
    }

    /// User-facing message for the highest-priority failure.
    pub fn message(&self) -> Option<String> {
        self.first().map(|error| error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn today() -> NaiveDate {
        date(2026, 10, 16)
    }

    #[rstest]
    #[case(ProductField::Id, "", Some(FieldError::Required))]
    #[case(ProductField::Id, "ab", Some(FieldError::TooShort { min: 3 }))]
    #[case(ProductField::Id, "abc", None)]
    #[case(ProductField::Id, "abcdefghijk", Some(FieldError::TooLong { max: 10 }))]
    #[case(ProductField::Name, "Card", Some(FieldError::TooShort { min: 5 }))]
    #[case(ProductField::Name, "Cards", None)]
    #[case(ProductField::Description, "Too short", Some(FieldError::TooShort { min: 10 }))]
    #[case(ProductField::Description, "Long enough", None)]
    #[case(ProductField::Logo, "", Some(FieldError::Required))]
    #[case(ProductField::Logo, "x", None)]
    #[case(ProductField::DateRelease, "2026-10-16", None)]
    #[case(ProductField::DateRelease, "2026-10-15", Some(FieldError::DateInPast))]
    #[case(ProductField::DateRelease, "16/10/2026", Some(FieldError::InvalidDate))]
    #[case(ProductField::DateRevision, "", Some(FieldError::Required))]
    fn field_rules_report_the_first_failure(
        #[case] field: ProductField,
        #[case] value: &str,
        #[case] expected: Option<FieldError>,
    ) {
        let report = FieldReport::evaluate(field.rules(), value, today());
        assert_eq!(report.first(), expected);
        assert_eq!(report.is_valid(), expected.is_none());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let report = FieldReport::evaluate(ProductField::Id.rules(), "ñüé", today());
        assert!(report.is_valid());
    }

    #[test]
    fn empty_value_only_fails_required() {
        let report = FieldReport::evaluate(ProductField::DateRelease.rules(), "", today());
        assert_eq!(report.errors(), [FieldError::Required]);
    }

    #[test]
    fn pushed_errors_keep_priority_order() {
        let mut report = FieldReport::from_errors([FieldError::Taken]);
        report.push(FieldError::TooShort { min: 3 });
        report.push(FieldError::Required);
        assert_eq!(
            report.errors(),
            [
                FieldError::Required,
                FieldError::TooShort { min: 3 },
                FieldError::Taken,
            ]
        );
        assert_eq!(report.message().as_deref(), Some("This field is required!"));
    }

    #[rstest]
    #[case(FieldError::Required, "This field is required!")]
    #[case(FieldError::TooShort { min: 5 }, "Minimum 5 characters")]
    #[case(FieldError::TooLong { max: 100 }, "Maximum 100 characters")]
    #[case(FieldError::DateInPast, "Date must be today or later")]
    #[case(FieldError::Taken, "ID not valid!")]
    fn messages_match_the_form_copy(#[case] error: FieldError, #[case] message: &str) {
        assert_eq!(error.to_string(), message);
    }

    #[rstest]
    #[case(" 2027-02-28 ", Some(date(2027, 2, 28)))]
    #[case("2027-02-30", None)]
    #[case("", None)]
    fn parse_date_accepts_iso_calendar_dates(
        #[case] raw: &str,
        #[case] expected: Option<NaiveDate>,
    ) {
        assert_eq!(parse_date(raw), expected);
    }
}
