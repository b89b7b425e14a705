//! DTOs for the catalog backend's JSON envelopes.
//!
//! Responses are decoded into these transport shapes first, then mapped into
//! domain records. Dates arrive either as `YYYY-MM-DD` or as full ISO-8601
//! timestamps; only the calendar date is kept.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{DATE_FORMAT, Product, ProductId};

#[derive(Debug, Deserialize)]
pub(super) struct ListEnvelopeDto {
    #[serde(default)]
    pub(super) data: Vec<ProductDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MutationEnvelopeDto {
    #[serde(default)]
    pub(super) message: String,
    pub(super) data: ProductDto,
}

/// Body of delete acknowledgements and error responses.
#[derive(Debug, Default, Deserialize)]
pub(super) struct MessageDto {
    #[serde(default)]
    pub(super) message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductDto {
    pub(super) id: String,
    pub(super) name: String,
    pub(super) description: String,
    #[serde(default)]
    pub(super) logo: String,
    pub(super) date_release: String,
    pub(super) date_revision: String,
}

impl ListEnvelopeDto {
    pub(super) fn into_domain_products(self) -> Result<Vec<Product>, String> {
        self.data
            .into_iter()
            .map(ProductDto::into_domain_product)
            .collect()
    }
}

impl ProductDto {
    pub(super) fn into_domain_product(self) -> Result<Product, String> {
        let date_release = parse_wire_date(&self.date_release)
            .ok_or_else(|| format!("product {} has invalid date_release", self.id))?;
        let date_revision = parse_wire_date(&self.date_revision)
            .ok_or_else(|| format!("product {} has invalid date_revision", self.id))?;
        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            description: self.description,
            logo: self.logo,
            date_release,
            date_revision,
        })
    }
}

fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let date = raw.split_once('T').map_or(raw, |(date, _)| date);
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("2026-10-16", NaiveDate::from_ymd_opt(2026, 10, 16))]
    #[case("2026-10-16T00:00:00.000Z", NaiveDate::from_ymd_opt(2026, 10, 16))]
    #[case("16-10-2026", None)]
    fn wire_dates_keep_only_the_calendar_day(
        #[case] raw: &str,
        #[case] expected: Option<NaiveDate>,
    ) {
        assert_eq!(parse_wire_date(raw), expected);
    }

    #[test]
    fn list_envelope_maps_into_products() {
        let body = r#"{
            "data": [
                {
                    "id": "trj-crd",
                    "name": "Tarjeta Credito",
                    "description": "Tarjeta de consumo bajo modalidad de credito",
                    "logo": "https://cdn.example.test/trj-crd.png",
                    "date_release": "2026-12-01T00:00:00.000Z",
                    "date_revision": "2027-12-01T00:00:00.000Z"
                }
            ]
        }"#;

        let envelope: ListEnvelopeDto = serde_json::from_str(body).expect("valid envelope");
        let products = envelope.into_domain_products().expect("valid products");

        assert_eq!(products.len(), 1);
        let product = products.first().expect("one product");
        assert_eq!(product.id.as_str(), "trj-crd");
        assert_eq!(
            Some(product.date_revision),
            NaiveDate::from_ymd_opt(2027, 12, 1)
        );
    }

    #[test]
    fn invalid_dates_are_reported_with_the_product_id() {
        let dto = ProductDto {
            id: "bad".to_owned(),
            name: "Broken card".to_owned(),
            description: "Card with a broken date".to_owned(),
            logo: String::new(),
            date_release: "soon".to_owned(),
            date_revision: "2027-01-01".to_owned(),
        };

        let error = dto.into_domain_product().expect_err("date must fail");
        assert_eq!(error, "product bad has invalid date_release");
    }
}
