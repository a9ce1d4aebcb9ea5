use std::sync::Arc;
use nb_core::{ContactInfo, InferenceModel};
use tracing::{info, warn};

/// Returned when there is nothing to summarize or no model to summarize with
pub const UNAVAILABLE_SUMMARY: &str = "No content available for summary or API key missing.";

pub(crate) const CONTENT_MARKER: &str = "Content to analyze:";

/// Turns collected research content into a networking brief.
#[derive(Debug, Clone)]
pub struct BriefGenerator {
    model: Option<Arc<dyn InferenceModel>>,
}

impl BriefGenerator {
    pub fn new(model: Option<Arc<dyn InferenceModel>>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().map(|model| model.name())
    }

    pub fn build_prompt(content: &str, contact: &ContactInfo) -> String {
        format!(
            "You are a networking assistant. Analyze the following information about {name} from {company} \
and create a concise networking brief.

Focus on:
1. Key information about the person and their role
2. Company overview and recent developments
3. Industry trends and opportunities
4. Potential conversation starters
5. Ways to add value to this connection

{marker}
{content}

Please provide a structured summary that will help prepare for a networking conversation.",
            name = contact.name,
            company = contact.company,
            marker = CONTENT_MARKER,
            content = content,
        )
    }

    /// Never fails: model errors come back as a fallback note naming the contact.
    pub async fn generate(&self, content: &str, contact: &ContactInfo) -> String {
        let model = match &self.model {
            Some(model) if !content.trim().is_empty() => model,
            _ => return UNAVAILABLE_SUMMARY.to_string(),
        };

        info!("🤖 Generating networking brief for {} with {}", contact.name, model.name());
        let prompt = Self::build_prompt(content, contact);
        match model.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("⚠️ Error generating brief: {}", e);
                format!(
                    "Summary generation failed: {}. Manual notes: Company website and news content were collected for {} at {}.",
                    e, contact.name, contact.company
                )
            }
        }
    }
}
