//! Product search domain - pricing materials against a store catalog

mod provider;
mod query;
mod summary;

pub use provider::ProductSearchProvider;
pub use query::{ProductQuery, StoreContext};
pub use summary::{Estimate, ProductSummary};

#[cfg(test)]
pub use provider::MockProductSearchProvider;
