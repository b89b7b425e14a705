//! Reqwest-backed catalog gateway.
//!
//! This adapter owns transport details only: URL construction, timeout,
//! status-to-message mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{ListEnvelopeDto, MessageDto, MutationEnvelopeDto};
use crate::domain::ports::{CatalogGateway, CatalogGatewayError, DeleteAck, ProductMutation};
use crate::domain::{Product, ProductId, ProductPatch};

const RESOURCE_SEGMENTS: [&str; 2] = ["bp", "productos"];
const VERIFY_SEGMENT: &str = "verificacion";

/// Catalog gateway talking to the REST backend under one base URL.
pub struct HttpCatalogGateway {
    client: Client,
    base: Url,
}

impl HttpCatalogGateway {
    /// Build a gateway using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, tail: &[&str]) -> Result<Url, CatalogGatewayError> {
        endpoint(&self.base, tail)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, CatalogGatewayError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "catalog response");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl CatalogGateway for HttpCatalogGateway {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogGatewayError> {
        let url = self.endpoint(&[])?;
        let body = self.execute(self.client.get(url)).await?;
        decode::<ListEnvelopeDto>(&body, "product list")?
            .into_domain_products()
            .map_err(CatalogGatewayError::decode)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CatalogGatewayError> {
        let products = self.list_products().await?;
        Ok(products.into_iter().find(|product| &product.id == id))
    }

    async fn create_product(
        &self,
        product: &Product,
    ) -> Result<ProductMutation, CatalogGatewayError> {
        let url = self.endpoint(&[])?;
        let body = self.execute(self.client.post(url).json(product)).await?;
        parse_mutation(&body)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<ProductMutation, CatalogGatewayError> {
        let url = self.endpoint(&[id.as_str()])?;
        let body = self.execute(self.client.put(url).json(patch)).await?;
        parse_mutation(&body)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<DeleteAck, CatalogGatewayError> {
        let url = self.endpoint(&[id.as_str()])?;
        let body = self.execute(self.client.delete(url)).await?;
        let dto: MessageDto = decode(&body, "delete acknowledgement")?;
        Ok(DeleteAck {
            message: dto.message.unwrap_or_default(),
        })
    }

    async fn verify_product_id(&self, id: &ProductId) -> Result<bool, CatalogGatewayError> {
        let url = self.endpoint(&[VERIFY_SEGMENT, id.as_str()])?;
        let body = self.execute(self.client.get(url)).await?;
        decode(&body, "verification result")
    }
}

fn endpoint(base: &Url, tail: &[&str]) -> Result<Url, CatalogGatewayError> {
    let mut url = base.clone();
    {
        let mut segments = url.path_segments_mut().map_err(|()| {
            CatalogGatewayError::transport(format!("base URL {base} cannot carry a path"))
        })?;
        segments
            .pop_if_empty()
            .extend(RESOURCE_SEGMENTS)
            .extend(tail);
    }
    Ok(url)
}

fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T, CatalogGatewayError> {
    serde_json::from_slice(body)
        .map_err(|error| CatalogGatewayError::decode(format!("invalid {what} payload: {error}")))
}

fn parse_mutation(body: &[u8]) -> Result<ProductMutation, CatalogGatewayError> {
    let dto: MutationEnvelopeDto = decode(body, "product mutation")?;
    let data = dto
        .data
        .into_domain_product()
        .map_err(CatalogGatewayError::decode)?;
    Ok(ProductMutation {
        message: dto.message,
        data,
    })
}

fn map_transport_error(error: reqwest::Error) -> CatalogGatewayError {
    CatalogGatewayError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CatalogGatewayError {
    let server_message = serde_json::from_slice::<MessageDto>(body)
        .ok()
        .and_then(|dto| dto.message)
        .filter(|message| !message.trim().is_empty());

    let message = match status {
        StatusCode::BAD_REQUEST => server_message.unwrap_or_else(|| "invalid request".to_owned()),
        StatusCode::NOT_FOUND => server_message.unwrap_or_else(|| "resource not found".to_owned()),
        StatusCode::INTERNAL_SERVER_ERROR => "internal server error".to_owned(),
        _ => server_message.unwrap_or_else(|| format!("Error: {}", status.as_u16())),
    };
    CatalogGatewayError::status_code(status.as_u16(), message)
}
