//! Driven port for the remote product catalog.
//!
//! The domain owns the request and response shapes so the list engine, the
//! uniqueness checker, and the form stay transport-agnostic.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Product, ProductId, ProductPatch};

/// Server acknowledgement for a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductMutation {
    /// Human-readable confirmation from the server.
    pub message: String,
    /// Product as stored by the server.
    pub data: Product,
}

/// Server acknowledgement for a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAck {
    /// Human-readable confirmation from the server.
    pub message: String,
}

/// Errors surfaced while calling the catalog backend.
///
/// `Display` renders the message verbatim so views can show it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogGatewayError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// User-facing message.
        message: String,
    },
    /// The request never produced a response.
    #[error("{message}")]
    Transport {
        /// User-facing message.
        message: String,
    },
    /// The response body did not match the expected shape.
    #[error("{message}")]
    Decode {
        /// User-facing message.
        message: String,
    },
}

impl CatalogGatewayError {
    /// Build a [`CatalogGatewayError::Status`].
    pub fn status_code(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Build a [`CatalogGatewayError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`CatalogGatewayError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// HTTP status, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// User-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. }
            | Self::Transport { message }
            | Self::Decode { message } => message,
        }
    }
}

/// Port for reading and mutating the remote catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Fetch the full catalog.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use catalog_client::domain::ports::{CatalogGateway, FixtureCatalogGateway};
    ///
    /// let products = FixtureCatalogGateway.list_products().await?;
    /// assert!(products.is_empty());
    /// # Ok::<(), catalog_client::domain::ports::CatalogGatewayError>(())
    /// ```
    async fn list_products(&self) -> Result<Vec<Product>, CatalogGatewayError>;

    /// Fetch one product; absence is `Ok(None)`, not an error.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, CatalogGatewayError>;

    /// Create a product with a client-supplied identifier.
    async fn create_product(
        &self,
        product: &Product,
    ) -> Result<ProductMutation, CatalogGatewayError>;

    /// Apply a partial update to an existing product.
    async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<ProductMutation, CatalogGatewayError>;

    /// Remove a product.
    async fn delete_product(&self, id: &ProductId) -> Result<DeleteAck, CatalogGatewayError>;

    /// Whether `id` is already taken.
    async fn verify_product_id(&self, id: &ProductId) -> Result<bool, CatalogGatewayError>;
}

/// Fixture implementation backed by an empty catalog.
///
/// Every identifier is reported as free; mutations fail with a 404.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCatalogGateway;

#[async_trait]
impl CatalogGateway for FixtureCatalogGateway {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogGatewayError> {
        Ok(Vec::new())
    }

    async fn get_product(&self, _id: &ProductId) -> Result<Option<Product>, CatalogGatewayError> {
        Ok(None)
    }

    async fn create_product(
        &self,
        product: &Product,
    ) -> Result<ProductMutation, CatalogGatewayError> {
        Ok(ProductMutation {
            message: "Product added successfully".to_owned(),
            data: product.clone(),
        })
    }

    async fn update_product(
        &self,
        id: &ProductId,
        _patch: &ProductPatch,
    ) -> Result<ProductMutation, CatalogGatewayError> {
        Err(CatalogGatewayError::status_code(
            404,
            format!("product {id} not found"),
        ))
    }

    async fn delete_product(&self, id: &ProductId) -> Result<DeleteAck, CatalogGatewayError> {
        Err(CatalogGatewayError::status_code(
            404,
            format!("product {id} not found"),
        ))
    }

    async fn verify_product_id(&self, _id: &ProductId) -> Result<bool, CatalogGatewayError> {
        Ok(false)
    }
}
