use std::fmt;
use async_trait::async_trait;
use nb_core::{InferenceModel, Result};

const EXCERPT_WORDS: usize = 60;

/// Offline stand-in that echoes the start of the prompt's content.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let content = prompt
            .split_once(crate::brief::CONTENT_MARKER)
            .map(|(_, rest)| rest)
            .unwrap_or(prompt);
        let words: Vec<&str> = content.split_whitespace().take(EXCERPT_WORDS).collect();
        Ok(format!("Offline brief: {}", words.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();
        let prompt = format!("Instructions here\n{}\nAcme builds solar farms.", crate::brief::CONTENT_MARKER);
        let text = model.generate(&prompt).await.unwrap();
        assert_eq!(text, "Offline brief: Acme builds solar farms.");
    }
}
