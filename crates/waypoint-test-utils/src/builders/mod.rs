//! Builders for test fixtures.

mod catalog;

pub use catalog::FlowCatalogBuilder;
