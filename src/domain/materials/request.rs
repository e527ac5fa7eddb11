use crate::domain::cache::{Fingerprint, FingerprintBuilder, Fingerprinted};

/// A build plan to extract materials from, bound to the model that will read it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanParseRequest {
    pub build_plan: String,
    pub model: String,
}

impl PlanParseRequest {
    pub fn new(build_plan: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            build_plan: build_plan.into(),
            model: model.into(),
        }
    }
}

impl Fingerprinted for PlanParseRequest {
    fn fingerprint(&self) -> Fingerprint {
        FingerprintBuilder::new()
            .field("buildPlan", self.build_plan.as_str())
            .field("model", self.model.as_str())
            .build()
    }
}
