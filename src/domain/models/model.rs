#[cfg(test)]
#[path = "model_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

/// One entry in the fixed model catalog. The id is the model tier string sent
/// with every outgoing message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelOption {
    pub id: &'static str,
    pub name: &'static str,
    pub provider: &'static str,
    pub description: &'static str,
}

pub static MODEL_CATALOG: [ModelOption; 4] = [
    ModelOption {
        id: "arcee-ai/trinity-large-preview:free",
        name: "Trinity Large",
        provider: "Arcee AI",
        description: "Highly capable reasoning model by Arcee AI.",
    },
    ModelOption {
        id: "stepfun/step-3.5-flash:free",
        name: "Step 3.5 Flash",
        provider: "StepFun",
        description: "Fast and efficient reasoning model by StepFun.",
    },
    ModelOption {
        id: "z-ai/glm-4.5-air:free",
        name: "GLM 4.5 Air",
        provider: "Z-AI",
        description: "Fast and efficient reasoning model by Z-AI.",
    },
    ModelOption {
        id: "nvidia/nemotron-3-nano-30b-a3b:free",
        name: "Nemotron 3 Nano",
        provider: "NVIDIA",
        description: "Fast and efficient reasoning model by NVIDIA.",
    },
];

/// Process-wide model selection. Changing it only affects the next outgoing
/// message, never messages already sent.
pub struct ModelSelector {
    active: usize,
}

impl Default for ModelSelector {
    fn default() -> ModelSelector {
        return ModelSelector { active: 0 };
    }
}

impl ModelSelector {
    /// Unknown ids fall back to the first catalog entry rather than failing,
    /// so a stale configured tier still yields a working selection.
    pub fn from_tier(tier: &str) -> ModelSelector {
        let active = MODEL_CATALOG
            .iter()
            .position(|model| return model.id == tier)
            .unwrap_or(0);

        return ModelSelector { active };
    }

    pub fn active(&self) -> &'static ModelOption {
        return &MODEL_CATALOG[self.active];
    }

    pub fn list(&self) -> &'static [ModelOption] {
        return &MODEL_CATALOG;
    }

    pub fn select(&mut self, entry: &str) -> Result<&'static ModelOption> {
        if let Ok(idx) = entry.parse::<usize>() {
            if idx < 1 || idx > MODEL_CATALOG.len() {
                bail!(format!("{idx} is not a valid index from the model list."));
            }
            self.active = idx - 1;
            return Ok(self.active());
        }

        if let Some(idx) = MODEL_CATALOG
            .iter()
            .position(|model| return model.id == entry)
        {
            self.active = idx;
            return Ok(self.active());
        }

        bail!(format!(
            "No model named {entry} found in the catalog. Run /models to list them."
        ));
    }
}
