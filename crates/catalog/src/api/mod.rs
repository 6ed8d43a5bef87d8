//! Catalog data source.
//!
//! The catalog is served as two static JSON documents: the title list and
//! a map of media-mix overrides. This module provides the HTTP client that
//! fetches them and the error taxonomy for failed loads.

pub mod client;

pub use client::{CatalogError, CatalogSource, HttpCatalogSource};
