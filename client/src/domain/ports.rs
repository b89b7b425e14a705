//! Domain ports for the hexagonal boundary.

mod catalog_gateway;

#[cfg(test)]
pub use catalog_gateway::MockCatalogGateway;
pub use catalog_gateway::{
    CatalogGateway, CatalogGatewayError, DeleteAck, FixtureCatalogGateway, ProductMutation,
};
