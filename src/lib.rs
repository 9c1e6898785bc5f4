//! Localized product-information pages for retail SKUs.
//!
//! The pipeline flows one direction: catalog CSV -> per-SKU JSON content
//! store -> (enrich -> merge -> QC -> premium pass, each rewriting the
//! store) -> rendered static HTML tree. The edit service reads and writes
//! the same store and can trigger a full re-render.

pub mod catalog;
pub mod config;
pub mod enrich;
pub mod generator;
pub mod i18n;
pub mod localizer;
pub mod merge;
pub mod premium;
pub mod product;
pub mod qc;
pub mod render;
pub mod report;
pub mod server;
pub mod store;
