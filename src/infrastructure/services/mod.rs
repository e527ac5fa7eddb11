//! Infrastructure services

mod plan_parser_service;
mod product_search_service;

pub use plan_parser_service::{DEFAULT_PARSE_MODEL, PlanParserService};
pub use product_search_service::ProductSearchService;
