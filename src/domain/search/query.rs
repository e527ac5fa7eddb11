use serde::{Deserialize, Serialize};

use crate::domain::cache::{Fingerprint, FingerprintBuilder, Fingerprinted};

/// Store the search is localized to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

impl StoreContext {
    pub fn new(store_zip: impl Into<String>, store_id: impl Into<String>) -> Self {
        Self {
            store_zip: Some(store_zip.into()),
            store_id: Some(store_id.into()),
        }
    }
}

/// One product search: a free-text query in a store context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub query: String,
    pub store: StoreContext,
}

impl ProductQuery {
    pub fn new(query: impl Into<String>, store: StoreContext) -> Self {
        Self {
            query: query.into(),
            store,
        }
    }
}

impl Fingerprinted for ProductQuery {
    fn fingerprint(&self) -> Fingerprint {
        FingerprintBuilder::new()
            .field("q", self.query.as_str())
            .optional_field("storeZip", self.store.store_zip.as_deref())
            .optional_field("storeId", self.store.store_id.as_deref())
            .build()
    }
}
