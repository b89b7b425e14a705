//! REST adapter for the product catalog backend.
//!
//! This module provides a reqwest implementation of the `CatalogGateway`
//! port.

mod dto;
mod gateway;

pub use gateway::HttpCatalogGateway;
