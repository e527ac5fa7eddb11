//! Materials domain - the list extracted from a build plan

mod entity;
mod normalize;
mod request;

pub use entity::Material;
pub use normalize::{normalize_quantity, parse_materials, strip_code_fences};
pub use request::PlanParseRequest;
