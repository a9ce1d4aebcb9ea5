use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait InferenceModel: Send + Sync + std::fmt::Debug {
    /// Human readable name of the backing model
    fn name(&self) -> &str;

    /// Run a single text generation call for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}
