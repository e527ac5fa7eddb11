//! Build plan to materials list, memoized per plan and model

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::cache::{Cache, Fingerprinted};
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::materials::{Material, PlanParseRequest, parse_materials};
use crate::domain::DomainError;

pub const DEFAULT_PARSE_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You're a helpful assistant. Return only a JSON array of materials \
extracted from the build plan with item name, quantity, and details like size or type when possible.";

const TEMPERATURE: f32 = 0.2;

/// Extracts a materials list from free-text build plans through an LLM
#[derive(Debug)]
pub struct PlanParserService {
    llm: Arc<dyn LlmProvider>,
    cache: Arc<dyn Cache<Vec<Material>>>,
    model: String,
}

impl PlanParserService {
    pub fn new(llm: Arc<dyn LlmProvider>, cache: Arc<dyn Cache<Vec<Material>>>) -> Self {
        Self::with_model(llm, cache, DEFAULT_PARSE_MODEL)
    }

    pub fn with_model(
        llm: Arc<dyn LlmProvider>,
        cache: Arc<dyn Cache<Vec<Material>>>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            cache,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the normalized materials for `build_plan`.
    ///
    /// With `bypass` set the cached value is ignored, but the fresh result
    /// still replaces it. Failed completions are never cached.
    pub async fn parse(&self, build_plan: &str, bypass: bool) -> Result<Vec<Material>, DomainError> {
        let request = PlanParseRequest::new(build_plan, self.model.as_str());
        let fingerprint = request.fingerprint();

        if !bypass {
            if let Some(materials) = self.cache.read(fingerprint.as_str()) {
                debug!(fingerprint = %fingerprint.digest(), model = %self.model, "Parse cache hit");
                return Ok(materials);
            }
            debug!(fingerprint = %fingerprint.digest(), model = %self.model, "Parse cache miss");
        }

        let llm_request = LlmRequest::instructed(SYSTEM_PROMPT, request.build_plan.as_str())
            .with_temperature(TEMPERATURE);

        info!(
            provider = self.llm.provider_name(),
            model = %self.model,
            bypass,
            "Requesting materials extraction"
        );

        let response = self
            .llm
            .chat(&self.model, llm_request)
            .await
            .inspect_err(|e| warn!(model = %self.model, error = %e, "Materials extraction failed"))?;

        let usage = response.usage.unwrap_or_default();
        if response.is_truncated() {
            warn!(
                model = %response.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Materials completion hit the token limit; the list may be incomplete"
            );
        } else {
            debug!(
                model = %response.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Materials completion received"
            );
        }

        let materials = parse_materials(response.content());
        self.cache.write(fingerprint.as_str(), materials.clone());

        Ok(materials)
    }
}
