mod error;
mod manager;
mod store;
mod trait_def;
mod validation;

pub use error::{CatalogError, CatalogResult};
pub use manager::CatalogManager;
pub use store::InMemoryCatalogStore;
pub use trait_def::CatalogStore;
pub use validation::{check_integrity, Problem};
