mod catalog;
mod loader;

pub use catalog::Catalog;
pub use loader::{load_catalog_from_json, parse_catalog, LoadError};
