//! Application state for shared services

use std::sync::Arc;

use crate::domain::DomainError;
use crate::infrastructure::services::{PlanParserService, ProductSearchService};

/// Services shared by the handlers. An integration whose credential is not
/// configured is absent, and its endpoint answers with a configuration error.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub plan_parser: Option<Arc<PlanParserService>>,
    pub product_search: Option<Arc<ProductSearchService>>,
}

impl AppState {
    pub fn new(
        plan_parser: Option<Arc<PlanParserService>>,
        product_search: Option<Arc<ProductSearchService>>,
    ) -> Self {
        Self {
            plan_parser,
            product_search,
        }
    }

    pub fn plan_parser(&self) -> Result<&PlanParserService, DomainError> {
        self.plan_parser
            .as_deref()
            .ok_or_else(|| DomainError::configuration("Missing OPENAI_API_KEY"))
    }

    pub fn product_search(&self) -> Result<Arc<ProductSearchService>, DomainError> {
        self.product_search
            .clone()
            .ok_or_else(|| DomainError::configuration("Missing SERPAPI_KEY"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_services_report_their_credential() {
        let state = AppState::default();

        let parser = state.plan_parser().unwrap_err();
        let search = state.product_search().unwrap_err();

        assert!(matches!(parser, DomainError::Configuration { .. }));
        assert_eq!(parser.message(), "Missing OPENAI_API_KEY");
        assert_eq!(search.message(), "Missing SERPAPI_KEY");
    }
}
