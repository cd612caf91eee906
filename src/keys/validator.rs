//! KeyValidator - probes one key against the backend and classifies the result.

use crate::gemini::{classify, GeminiClient, KeyFailure, ModelInfo};

/// Result of validating one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The key is usable and unlocks the given model.
    Live { model: String },
    /// The key was rejected, with a coarse reason.
    Invalid { reason: KeyFailure },
}

/// Validates keys against the backend.
pub struct KeyValidator<'a> {
    client: &'a GeminiClient,
}

impl<'a> KeyValidator<'a> {
    pub fn new(client: &'a GeminiClient) -> Self {
        Self { client }
    }

    /// Validate one key end to end.
    ///
    /// Lists the models the key can invoke, selects one by the fixed
    /// preference order, then issues a minimal probe generation call so that
    /// rate-limit and auth problems surface here rather than mid-batch.
    pub async fn validate(&self, key: &str) -> ValidationOutcome {
        let models = match self.client.list_models(key).await {
            Ok(models) => models,
            Err(e) => {
                return ValidationOutcome::Invalid {
                    reason: classify(&e),
                }
            }
        };

        let model = match select_model(&models) {
            Some(model) => model,
            None => {
                return ValidationOutcome::Invalid {
                    reason: KeyFailure::NoModel,
                }
            }
        };

        // A model being listed does not mean the key may call it.
        if let Err(e) = self.client.probe(key, &model).await {
            return ValidationOutcome::Invalid {
                reason: classify(&e),
            };
        }

        ValidationOutcome::Live { model }
    }
}

/// Choose a model by the fixed preference order.
///
/// Prefer the low-latency 1.5 flash variant, fall back to 1.5 pro, fall back
/// to whatever generation-capable model is offered first. `None` if the key
/// unlocks no model that supports generation at all.
pub fn select_model(models: &[ModelInfo]) -> Option<String> {
    let candidates: Vec<&str> = models
        .iter()
        .filter(|m| m.supports_generation())
        .map(|m| m.name.as_str())
        .collect();

    candidates
        .iter()
        .find(|name| name.contains("flash") && name.contains("1.5"))
        .or_else(|| {
            candidates
                .iter()
                .find(|name| name.contains("pro") && name.contains("1.5"))
        })
        .or_else(|| candidates.first())
        .map(|name| name.to_string())
}
