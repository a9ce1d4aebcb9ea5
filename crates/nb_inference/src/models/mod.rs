use std::sync::Arc;
use nb_core::{Config, Error, InferenceModel, Result};
use tracing::info;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Gemini,
    Dummy,
}

impl std::str::FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "dummy" => Ok(Self::Dummy),
            other => Err(Error::InvalidInput(format!(
                "Unknown model: {}. Available models: gemini (default), dummy",
                other
            ))),
        }
    }
}

/// Build the configured model.
///
/// `Ok(None)` means no credential is available; briefs then fall back to the
/// unavailability notice instead of calling a model.
pub fn create_model(kind: ModelKind, config: &Config) -> Result<Option<Arc<dyn InferenceModel>>> {
    match kind {
        ModelKind::Gemini => match config.gemini_api_key.clone() {
            Some(api_key) => {
                let model = GeminiModel::new(api_key, &config.model_name)?;
                info!("🧠 Inference model initialized (using {})", config.model_name);
                Ok(Some(Arc::new(model)))
            }
            None => {
                info!("🧠 No Gemini API key configured, briefs will not be generated");
                Ok(None)
            }
        },
        ModelKind::Dummy => {
            info!("🧠 Inference model initialized (using dummy)");
            Ok(Some(Arc::new(DummyModel::new())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_from_str() {
        assert_eq!("gemini".parse::<ModelKind>().unwrap(), ModelKind::Gemini);
        assert_eq!("Dummy".parse::<ModelKind>().unwrap(), ModelKind::Dummy);
        assert!("ollama".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_gemini_without_key_is_none() {
        let model = create_model(ModelKind::Gemini, &Config::default()).unwrap();
        assert!(model.is_none());
    }

    #[test]
    fn test_gemini_with_key() {
        let config = Config::default().with_gemini_api_key(Some("test-key".to_string()));
        let model = create_model(ModelKind::Gemini, &config).unwrap().unwrap();
        assert_eq!(model.name(), "Gemini");
    }

    #[test]
    fn test_dummy_needs_no_key() {
        let model = create_model(ModelKind::Dummy, &Config::default()).unwrap();
        assert_eq!(model.unwrap().name(), "Dummy");
    }
}
